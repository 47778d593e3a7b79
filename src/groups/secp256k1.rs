// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! secp256k1 elliptic curve group implementation.
//!
//! This module provides a `Group` trait implementation for the secp256k1 curve,
//! which is the elliptic curve used by Bitcoin.
//!
//! # Curve Parameters
//! - **Order (n)**: FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141 (prime)
//! - **Cofactor (h)**: 1 (prime-order curve)
//! - **Curve equation**: y² = x³ + 7 over F_p
//! - **Base point (G)**: Standardized generator point
//! - **Second generator (H)**: first valid x-coordinate of
//!   `SHA-256(H_DOMAIN || counter)`, with even y. Nobody knows `log_G(H)`.

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{
    AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar, U256,
};

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::identities::One;
use rand::rngs::OsRng;

use std::sync::Arc;

use crate::error::{AvssError, Result};
use crate::group::{hash_multiple, Group};

/// Domain separation tag for deriving H.
const H_DOMAIN: &[u8] = b"avss-rs/secp256k1/pedersen-h";

/// secp256k1 elliptic curve group (Bitcoin's curve)
///
/// This is a prime-order curve with cofactor h = 1, which means all points
/// on the curve are in the prime-order subgroup.
#[derive(Debug, Clone)]
pub struct Secp256k1Group {
    order: BigUint,
    h: AffinePoint,
}

impl Secp256k1Group {
    /// Create a new secp256k1 group instance
    pub fn new() -> Arc<Self> {
        // ORDER = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
        let order_bytes: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48,
            0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
        ];
        let order = BigUint::from_bytes_be(&order_bytes);

        Arc::new(Secp256k1Group {
            order,
            h: derive_blinding_generator(),
        })
    }
}

/// Try-and-increment hash to curve.
///
/// Roughly half of all x-coordinates lie on the curve, so this returns after
/// a couple of iterations.
fn derive_blinding_generator() -> AffinePoint {
    let mut counter: u32 = 0;
    loop {
        let digest = hash_multiple(&[H_DOMAIN, &counter.to_be_bytes()]);
        let mut compressed = Vec::with_capacity(33);
        compressed.push(0x02);
        compressed.extend_from_slice(&digest);
        if let Ok(encoded) = EncodedPoint::from_bytes(&compressed) {
            let candidate: Option<AffinePoint> =
                AffinePoint::from_encoded_point(&encoded).into();
            if let Some(point) = candidate {
                return point;
            }
        }
        counter = counter.wrapping_add(1);
    }
}

/// Left-pad a big-endian integer to 32 bytes, `None` if it does not fit.
fn to_field_bytes(x: &BigUint) -> Option<FieldBytes> {
    let bytes = x.to_bytes_be();
    if bytes.len() > 32 {
        return None;
    }
    let mut buf = [0u8; 32];
    buf[32 - bytes.len()..].copy_from_slice(&bytes);
    Some(FieldBytes::from(buf))
}

impl Group for Secp256k1Group {
    type Scalar = Scalar;
    type Element = AffinePoint;

    fn order(&self) -> &BigUint {
        &self.order
    }

    fn generator(&self) -> Self::Element {
        AffinePoint::GENERATOR
    }

    fn blinding_generator(&self) -> Self::Element {
        self.h
    }

    fn identity(&self) -> Self::Element {
        AffinePoint::IDENTITY
    }

    fn exp(
        &self,
        base: &Self::Element,
        scalar: &Self::Scalar,
    ) -> Self::Element {
        (ProjectivePoint::from(*base) * scalar).into()
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        (ProjectivePoint::from(*a) + ProjectivePoint::from(*b)).into()
    }

    fn scalar_add(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        a + b
    }

    fn scalar_sub(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        a - b
    }

    fn scalar_mul(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        a * b
    }

    fn scalar_inverse(&self, x: &Self::Scalar) -> Option<Self::Scalar> {
        x.invert().into()
    }

    fn scalar_from_u64(&self, x: u64) -> Self::Scalar {
        Scalar::from(x)
    }

    fn scalar_from_biguint(&self, x: &BigUint) -> Self::Scalar {
        let reduced = x.mod_floor(&self.order);
        match to_field_bytes(&reduced) {
            Some(bytes) => <Scalar as Reduce<U256>>::reduce_bytes(&bytes),
            // reduced < order < 2^256
            None => Scalar::ZERO,
        }
    }

    fn scalar_to_biguint(&self, x: &Self::Scalar) -> BigUint {
        BigUint::from_bytes_be(&x.to_bytes())
    }

    fn random_scalar(&self) -> Result<Self::Scalar> {
        let mut rng =
            OsRng::new().map_err(|e| AvssError::Entropy(e.to_string()))?;
        let value = rng.gen_biguint_range(&BigUint::one(), &self.order);
        Ok(self.scalar_from_biguint(&value))
    }

    fn element_to_bytes(&self, elem: &Self::Element) -> Vec<u8> {
        elem.to_encoded_point(true).as_bytes().to_vec()
    }

    fn bytes_to_element(&self, bytes: &[u8]) -> Result<Self::Element> {
        let encoded = EncodedPoint::from_bytes(bytes)
            .map_err(|e| AvssError::InvalidPoint(e.to_string()))?;
        Option::from(AffinePoint::from_encoded_point(&encoded)).ok_or_else(
            || AvssError::InvalidPoint("point is not on secp256k1".into()),
        )
    }

    fn element_from_coordinates(
        &self,
        x: &BigUint,
        y: &BigUint,
    ) -> Result<Self::Element> {
        let (x, y) = match (to_field_bytes(x), to_field_bytes(y)) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                return Err(AvssError::InvalidPoint(
                    "coordinate exceeds 256 bits".into(),
                ))
            }
        };
        let encoded = EncodedPoint::from_affine_coordinates(&x, &y, false);
        Option::from(AffinePoint::from_encoded_point(&encoded)).ok_or_else(
            || AvssError::InvalidPoint("(X, Y) is not on secp256k1".into()),
        )
    }

    fn element_to_coordinates(
        &self,
        elem: &Self::Element,
    ) -> Option<(BigUint, BigUint)> {
        let encoded = elem.to_encoded_point(false);
        match (encoded.x(), encoded.y()) {
            (Some(x), Some(y)) => {
                Some((BigUint::from_bytes_be(x), BigUint::from_bytes_be(y)))
            }
            _ => None,
        }
    }
}
