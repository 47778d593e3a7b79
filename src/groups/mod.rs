// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Group implementations for the AVSS scheme.
//!
//! - `secp256k1`: secp256k1 elliptic curve with a hash-derived second generator

pub mod secp256k1;

pub use secp256k1::Secp256k1Group;
