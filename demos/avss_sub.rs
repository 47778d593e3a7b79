// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

use avss_rs::groups::Secp256k1Group;
use avss_rs::{
    reconstruct, string_from_secret, string_to_secret, verify_point,
    verify_poly, verify_share, AvssParams, Dealer, Group, VerifiedShare,
};

fn main() {
    let group = Secp256k1Group::new();
    let secret_message = String::from("Hello Sub AVSS Example.");
    let dealer = Dealer::new(group.clone(), AvssParams::new(3, 4).unwrap());
    let deal = dealer
        .deal(&string_to_secret(group.as_ref(), &secret_message).unwrap())
        .unwrap();
    let c = &deal.commitment;

    let p1 = deal.for_participant(1).unwrap();
    let p2 = deal.for_participant(2).unwrap();
    let p3 = deal.for_participant(3).unwrap();
    let p4 = deal.for_participant(4).unwrap();

    for p in [p1, p2, p3, p4] {
        assert_eq!(
            verify_poly(c, p.index, &p.a, &p.a_prime, &p.b, &p.b_prime),
            true
        );
    }

    // p2 echoes its cross points to p1; every pair of participants does the same
    let (a, a_prime) = (p2.a.eval_at_index(1), p2.a_prime.eval_at_index(1));
    let (b, b_prime) = (p2.b.eval_at_index(1), p2.b_prime.eval_at_index(1));
    assert_eq!(verify_point(c, 2, 1, &a, &a_prime, &b, &b_prime), true);
    assert_eq!(p1.b.eval_at_index(2), a);
    assert_eq!(p1.a.eval_at_index(2), b);

    // a tampered cross point no longer opens the commitment
    let forged = group.scalar_add(&a, &group.scalar_from_u64(1));
    assert_eq!(verify_point(c, 2, 1, &forged, &a_prime, &b, &b_prime), false);

    let share = |p: &avss_rs::DealtPolynomials<Secp256k1Group>| VerifiedShare {
        index: p.index,
        value: p.a.constant_term(),
        blinding: p.a_prime.constant_term(),
    };
    let (s1, s2, s3, s4) = (share(p1), share(p2), share(p3), share(p4));
    assert_eq!(verify_share(c, s3.index, &s3.value, &s3.blinding), true);

    // Threshold is 3, so p1, p2, p4 can reconstruct (or any 3 participants)
    let (r1, _) = reconstruct(c, &[s1, s2, s4], 3).unwrap();
    let (r2, _) = reconstruct(c, &[s4, s3, s2], 3).unwrap();

    let r1_str = string_from_secret(group.as_ref(), &r1).unwrap();
    assert_eq!(secret_message.clone(), r1_str);
    let r2_str = string_from_secret(group.as_ref(), &r2).unwrap();
    assert_eq!(secret_message.clone(), r2_str);

    println!("secret message: {}", secret_message);
    println!("r1 str: {}", r1_str);
    println!("r2 str: {}", r2_str);
}
