// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

use avss_rs::groups::Secp256k1Group;
use avss_rs::{
    reconstruct, string_from_secret, string_to_secret, AvssParams, Dealer,
    NodeState, Participant,
};
use std::collections::VecDeque;

fn main() {
    let group = Secp256k1Group::new();
    let secret_message = String::from("Hello All AVSS Example.");
    let params = AvssParams::new(7, 9).unwrap();

    let dealer = Dealer::new(group.clone(), params);
    let deal = dealer
        .deal(&string_to_secret(group.as_ref(), &secret_message).unwrap())
        .unwrap();

    let mut nodes: Vec<Participant<Secp256k1Group>> = params
        .indices()
        .map(|i| Participant::new(group.clone(), params, i).unwrap())
        .collect();

    // dealer sends commitments and restricted polynomials, nodes answer with echoes
    let mut inbox = VecDeque::new();
    for node in nodes.iter_mut() {
        let polys = deal.for_participant(node.index()).unwrap().clone();
        inbox.extend(node.receive_deal(deal.commitment.clone(), polys).unwrap());
    }
    println!("{} echoes in flight", inbox.len());

    // echoes and readys are delivered until every node settles
    while let Some(msg) = inbox.pop_front() {
        let receiver = msg.receiver() as usize - 1;
        inbox.extend(nodes[receiver].handle_message(msg).unwrap());
    }

    for node in &nodes {
        assert_eq!(node.state(), NodeState::Complete);
        println!(
            "p{}: {} valid echoes, {} valid readys",
            node.index(),
            node.valid_echoes(),
            node.valid_readys()
        );
    }

    // any 7 completed participants recover the secret
    let shares: Vec<_> = nodes.iter().filter_map(|n| n.share()).collect();
    let (r1, _) = reconstruct(&deal.commitment, &shares[0..7], 7).unwrap();
    let (r2, _) = reconstruct(&deal.commitment, &shares[2..9], 7).unwrap();
    let r1_str = string_from_secret(group.as_ref(), &r1).unwrap();
    let r2_str = string_from_secret(group.as_ref(), &r2).unwrap();
    assert_eq!(secret_message, r1_str);
    assert_eq!(secret_message, r2_str);

    println!("secret message: {}", secret_message);
    println!("r1 str: {}", r1_str);
    println!("r2 str: {}", r2_str);
}
