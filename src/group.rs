// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Cryptographic group abstraction for the AVSS scheme.
//!
//! The scheme needs a prime-order group with two independent generators:
//! `G` (the standard base point) and `H` (a second generator whose discrete
//! logarithm relative to `G` is unknown). Pedersen commitments
//! `value*G + blinding*H` are built from those two.
//!
//! A group value is constructed once, wrapped in an `Arc`, and handed to every
//! arithmetic, commitment and verification call. There is no global curve.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Cryptographic group abstraction for AVSS operations.
///
/// The naming follows multiplicative notation:
/// - `exp(P, k)` is scalar multiplication `k*P`
/// - `mul(A, B)` is the group operation, point addition `A + B`
///
/// # Type Parameters
/// - `Scalar`: integer modulo the group order
/// - `Element`: group element (an affine curve point)
pub trait Group: Clone + std::fmt::Debug + Send + Sync {
    /// Scalar type, closed under arithmetic modulo the group order
    type Scalar: Copy + Eq + std::fmt::Debug + Send + Sync;

    /// Group element type
    type Element: Copy + Eq + std::fmt::Debug + Send + Sync;

    /// Prime group order
    fn order(&self) -> &BigUint;

    /// Standard base point G
    fn generator(&self) -> Self::Element;

    /// Second generator H with unknown discrete log relative to G
    fn blinding_generator(&self) -> Self::Element;

    /// Identity element (point at infinity)
    fn identity(&self) -> Self::Element;

    /// Scalar multiplication: `scalar * base`
    fn exp(&self, base: &Self::Element, scalar: &Self::Scalar)
    -> Self::Element;

    /// Group operation: `a + b`
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// `(a + b) mod order`
    fn scalar_add(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// `(a - b) mod order`
    fn scalar_sub(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// `(a * b) mod order`
    fn scalar_mul(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Modular inverse, `None` for zero
    fn scalar_inverse(&self, x: &Self::Scalar) -> Option<Self::Scalar>;

    fn scalar_from_u64(&self, x: u64) -> Self::Scalar;

    /// Canonical scalar for an arbitrary-precision integer, reduced mod order
    fn scalar_from_biguint(&self, x: &BigUint) -> Self::Scalar;

    fn scalar_to_biguint(&self, x: &Self::Scalar) -> BigUint;

    /// Uniform random scalar in `[1, order - 1]` from the OS entropy source.
    ///
    /// Fails with `AvssError::Entropy` when the source cannot be read.
    fn random_scalar(&self) -> Result<Self::Scalar>;

    /// Serialize element to bytes (SEC1 compressed)
    fn element_to_bytes(&self, elem: &Self::Element) -> Vec<u8>;

    /// Deserialize bytes to element, rejecting anything not on the curve
    fn bytes_to_element(&self, bytes: &[u8]) -> Result<Self::Element>;

    /// Build an element from affine coordinates `(X, Y)`.
    fn element_from_coordinates(
        &self,
        x: &BigUint,
        y: &BigUint,
    ) -> Result<Self::Element>;

    /// Affine coordinates, `None` for the identity
    fn element_to_coordinates(
        &self,
        elem: &Self::Element,
    ) -> Option<(BigUint, BigUint)>;

    /// Pedersen commitment `value*G + blinding*H`
    fn commit(
        &self,
        value: &Self::Scalar,
        blinding: &Self::Scalar,
    ) -> Self::Element {
        let g_v = self.exp(&self.generator(), value);
        let h_b = self.exp(&self.blinding_generator(), blinding);
        self.mul(&g_v, &h_b)
    }

    /// Multi-scalar sum `Σ scalars[k] * elements[k]`
    fn linear_combination(
        &self,
        elements: &[Self::Element],
        scalars: &[Self::Scalar],
    ) -> Self::Element {
        elements
            .iter()
            .zip(scalars.iter())
            .fold(self.identity(), |acc, (e, s)| {
                self.mul(&acc, &self.exp(e, s))
            })
    }

    /// `[1, x, x^2, ..., x^(len-1)]`
    fn powers(&self, x: &Self::Scalar, len: usize) -> Vec<Self::Scalar> {
        let mut powers = Vec::with_capacity(len);
        let mut current = self.scalar_from_u64(1);
        for _ in 0..len {
            powers.push(current);
            current = self.scalar_mul(&current, x);
        }
        powers
    }
}

/// Helper function to compute SHA-256 hash of multiple byte sequences
pub fn hash_multiple(inputs: &[&[u8]]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize().to_vec()
}
