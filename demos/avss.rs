// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

use avss_rs::groups::Secp256k1Group;
use avss_rs::{
    reconstruct, string_from_secret, string_to_secret, AvssParams, Dealer,
};

fn main() {
    let group = Secp256k1Group::new();
    let secret_message = String::from("Hello AVSS.");
    let secret = string_to_secret(group.as_ref(), &secret_message).unwrap();

    let dealer = Dealer::new(group.clone(), AvssParams::new(2, 3).unwrap());
    let deal = dealer.deal(&secret).unwrap();

    let shares: Vec<_> = deal
        .polynomials
        .iter()
        .map(|p| avss_rs::VerifiedShare {
            index: p.index,
            value: p.a.constant_term(),
            blinding: p.a_prime.constant_term(),
        })
        .collect();
    let (r, _) = reconstruct(&deal.commitment, &shares, 2).unwrap();
    let r_str = string_from_secret(group.as_ref(), &r).unwrap();
    assert_eq!(secret_message, r_str);
    println!("secret message: {}", secret_message);
    println!("reconstructed: {}", r_str);
}
