// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Asynchronous Verifiable Secret Sharing over bivariate polynomials.
//!
//! A dealer commits to a secret bivariate polynomial `f` and a blinding
//! polynomial `f'` with a matrix of Pedersen commitments, then hands each
//! participant its row and column restrictions. Participants check the dealer,
//! cross-check each other through Echo and Ready messages, and finish with a
//! share that any `t` of them can interpolate back to the secret.

pub mod auth;
pub mod commitment;
pub mod dealer;
pub mod error;
pub mod group;
pub mod groups;
pub mod lagrange;
pub mod message;
pub mod params;
pub mod participant;
pub mod polynomial;
pub mod verify;

pub use auth::{IdentityVerifier, TokenVerifier};
pub use commitment::CommitmentMatrix;
pub use dealer::{Deal, Dealer, DealtPolynomials};
pub use error::{AvssError, Result};
pub use group::Group;
pub use groups::Secp256k1Group;
pub use lagrange::{
    interpolate, reconstruct, LabeledShare, ShareSet, VerifiedShare,
};
pub use message::{CrossPoints, ProtocolMessage, Round};
pub use params::AvssParams;
pub use participant::{NodeState, Participant};
pub use polynomial::{BivariatePolynomial, Polynomial};
pub use verify::{verify_point, verify_poly, verify_share};

use num_bigint::BigUint;

/// Encode a short UTF-8 message as a scalar (little-endian bytes).
///
/// The message must be smaller than the group order, i.e. at most 31 bytes
/// for secp256k1.
pub fn string_to_secret<G: Group>(group: &G, message: &str) -> Result<G::Scalar> {
    let value = BigUint::from_bytes_le(message.as_bytes());
    if &value >= group.order() {
        return Err(AvssError::InvalidScalar(format!(
            "message of {} bytes does not fit below the group order",
            message.len()
        )));
    }
    Ok(group.scalar_from_biguint(&value))
}

/// Inverse of [`string_to_secret`].
pub fn string_from_secret<G: Group>(group: &G, secret: &G::Scalar) -> Result<String> {
    let value = group.scalar_to_biguint(secret);
    String::from_utf8(value.to_bytes_le())
        .map_err(|e| AvssError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_str_utf8() {
        let group = Secp256k1Group::new();
        let message = "Hello AVSS.";
        let secret = string_to_secret(group.as_ref(), message).unwrap();
        assert_eq!(string_from_secret(group.as_ref(), &secret).unwrap(), message);
    }

    #[test]
    fn test_secret_str_too_long() {
        let group = Secp256k1Group::new();
        let message = "x".repeat(40);
        assert!(matches!(
            string_to_secret(group.as_ref(), &message),
            Err(AvssError::InvalidScalar(_))
        ));
    }
}
