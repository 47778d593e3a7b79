// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Lagrange interpolation over labeled shares.
//!
//! `ShareSet` is the only way into `interpolate`: it rejects index 0 and
//! duplicate indices when it is built, so every basis denominator
//! `index_i - index_j` is invertible by the time interpolation runs.

use log::{debug, warn};
use std::collections::BTreeSet;

use crate::commitment::CommitmentMatrix;
use crate::error::{AvssError, Result};
use crate::group::Group;
use crate::verify::verify_share;

/// A point `(index, value)` on a univariate polynomial.
#[derive(Debug)]
pub struct LabeledShare<G: Group> {
    pub index: u32,
    pub value: G::Scalar,
}

impl<G: Group> Clone for LabeledShare<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: Group> Copy for LabeledShare<G> {}

impl<G: Group> PartialEq for LabeledShare<G> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.value == other.value
    }
}

impl<G: Group> Eq for LabeledShare<G> {}

impl<G: Group> LabeledShare<G> {
    pub fn new(index: u32, value: G::Scalar) -> Self {
        LabeledShare { index, value }
    }
}

/// Interpolation set with pairwise-distinct, non-zero indices.
#[derive(Debug, Clone)]
pub struct ShareSet<G: Group> {
    shares: Vec<LabeledShare<G>>,
}

impl<G: Group> ShareSet<G> {
    pub fn new(shares: Vec<LabeledShare<G>>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for share in &shares {
            if share.index == 0 {
                return Err(AvssError::InvalidIndex(0));
            }
            if !seen.insert(share.index) {
                return Err(AvssError::DuplicateShareIndex(share.index));
            }
        }
        Ok(ShareSet { shares })
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn shares(&self) -> &[LabeledShare<G>] {
        &self.shares
    }
}

/// Lagrange basis polynomial `λ_k` evaluated at `x`:
/// `Π_{j != k} (x - x_j) / (x_k - x_j)`.
pub fn lagrange_coefficient<G: Group>(
    group: &G,
    set: &ShareSet<G>,
    position: usize,
    x: &G::Scalar,
) -> Result<G::Scalar> {
    let shares = set.shares();
    let x_k = match shares.get(position) {
        Some(share) => group.scalar_from_u64(u64::from(share.index)),
        None => {
            return Err(AvssError::DimensionMismatch {
                expected: shares.len(),
                actual: position,
            })
        }
    };
    let mut numerator = group.scalar_from_u64(1);
    let mut denominator = group.scalar_from_u64(1);
    for (j, share) in shares.iter().enumerate() {
        if j == position {
            continue;
        }
        let x_j = group.scalar_from_u64(u64::from(share.index));
        numerator = group.scalar_mul(&numerator, &group.scalar_sub(x, &x_j));
        denominator =
            group.scalar_mul(&denominator, &group.scalar_sub(&x_k, &x_j));
    }
    let inverse = group
        .scalar_inverse(&denominator)
        .ok_or(AvssError::NonInvertible)?;
    Ok(group.scalar_mul(&numerator, &inverse))
}

/// Evaluate at `x` the unique polynomial of degree `len - 1` through the set.
pub fn interpolate<G: Group>(
    group: &G,
    set: &ShareSet<G>,
    x: &G::Scalar,
) -> Result<G::Scalar> {
    if set.is_empty() {
        return Err(AvssError::InsufficientShares { got: 0, need: 1 });
    }
    let mut result = group.scalar_from_u64(0);
    for (k, share) in set.shares().iter().enumerate() {
        let lambda = lagrange_coefficient(group, set, k, x)?;
        result = group.scalar_add(&result, &group.scalar_mul(&share.value, &lambda));
    }
    Ok(result)
}

/// Final share of a completed participant: `(f(i, 0), f'(i, 0))`.
#[derive(Debug)]
pub struct VerifiedShare<G: Group> {
    pub index: u32,
    pub value: G::Scalar,
    pub blinding: G::Scalar,
}

impl<G: Group> Clone for VerifiedShare<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: Group> Copy for VerifiedShare<G> {}

impl<G: Group> PartialEq for VerifiedShare<G> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.value == other.value
            && self.blinding == other.blinding
    }
}

impl<G: Group> Eq for VerifiedShare<G> {}

/// Reconstruct `(s, s')` from completed participants' shares.
///
/// Shares that fail `verify_share` are dropped. The first `threshold` valid
/// shares are interpolated at 0; duplicates among them are a caller bug and
/// surface as `DuplicateShareIndex`.
pub fn reconstruct<G: Group>(
    commitment: &CommitmentMatrix<G>,
    shares: &[VerifiedShare<G>],
    threshold: usize,
) -> Result<(G::Scalar, G::Scalar)> {
    let group = commitment.group().as_ref();
    let valid: Vec<&VerifiedShare<G>> = shares
        .iter()
        .filter(|s| {
            let ok = verify_share(commitment, s.index, &s.value, &s.blinding);
            if !ok {
                warn!("dropping share of participant {}: commitment mismatch", s.index);
            }
            ok
        })
        .take(threshold)
        .collect();
    if valid.len() < threshold {
        return Err(AvssError::InsufficientShares {
            got: valid.len(),
            need: threshold,
        });
    }

    let values = ShareSet::new(
        valid.iter().map(|s| LabeledShare::new(s.index, s.value)).collect(),
    )?;
    let blindings = ShareSet::new(
        valid
            .iter()
            .map(|s| LabeledShare::new(s.index, s.blinding))
            .collect(),
    )?;
    let zero = group.scalar_from_u64(0);
    let secret = interpolate(group, &values, &zero)?;
    let blinding = interpolate(group, &blindings, &zero)?;
    debug!("reconstructed secret from {} shares", valid.len());
    Ok((secret, blinding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::Secp256k1Group;
    use crate::polynomial::{BivariatePolynomial, Polynomial};
    use k256::Scalar;

    type Share = LabeledShare<Secp256k1Group>;

    #[test]
    fn test_interpolate_small_polynomial() {
        let group = Secp256k1Group::new();
        // p(x) = 7 + 2x + 3x^2
        let p = Polynomial::from_coefficients(
            group.clone(),
            vec![Scalar::from(7u64), Scalar::from(2u64), Scalar::from(3u64)],
        )
        .unwrap();
        let set = ShareSet::new(
            [1u32, 4, 6]
                .iter()
                .map(|i| Share::new(*i, p.eval_at_index(*i)))
                .collect(),
        )
        .unwrap();
        assert_eq!(
            interpolate(group.as_ref(), &set, &Scalar::ZERO).unwrap(),
            Scalar::from(7u64)
        );
        assert_eq!(
            interpolate(group.as_ref(), &set, &Scalar::from(2u64)).unwrap(),
            p.eval_at_index(2)
        );
    }

    #[test]
    fn test_lagrange_coefficients_sum_to_one() {
        let group = Secp256k1Group::new();
        let set = ShareSet::new(
            (1..=5).map(|i| Share::new(i, Scalar::ZERO)).collect(),
        )
        .unwrap();
        let mut sum = Scalar::ZERO;
        for k in 0..set.len() {
            sum += lagrange_coefficient(group.as_ref(), &set, k, &Scalar::ZERO)
                .unwrap();
        }
        assert_eq!(sum, Scalar::ONE);
    }

    #[test]
    fn test_duplicate_index_rejected_at_construction() {
        let shares = vec![
            Share::new(1, Scalar::ONE),
            Share::new(2, Scalar::ONE),
            Share::new(1, Scalar::ZERO),
        ];
        assert_eq!(
            ShareSet::new(shares).unwrap_err(),
            AvssError::DuplicateShareIndex(1)
        );
        assert_eq!(
            ShareSet::new(vec![Share::new(0, Scalar::ONE)]).unwrap_err(),
            AvssError::InvalidIndex(0)
        );
    }

    #[test]
    fn test_interpolate_empty_set() {
        let group = Secp256k1Group::new();
        let set = ShareSet::<Secp256k1Group>::new(vec![]).unwrap();
        assert!(interpolate(group.as_ref(), &set, &Scalar::ZERO).is_err());
    }

    #[test]
    fn test_robustness_any_subset() {
        let group = Secp256k1Group::new();
        let secret = group.random_scalar().unwrap();
        let f = BivariatePolynomial::random(group.clone(), &secret, 7).unwrap();
        let shares: Vec<Share> = (1..=9)
            .map(|i| Share::new(i, f.evaluate_at_x_index(i).constant_term()))
            .collect();
        let first = ShareSet::new(shares[0..7].to_vec()).unwrap();
        let second = ShareSet::new(shares[1..8].to_vec()).unwrap();
        let r1 = interpolate(group.as_ref(), &first, &Scalar::ZERO).unwrap();
        let r2 = interpolate(group.as_ref(), &second, &Scalar::ZERO).unwrap();
        assert_eq!(r1, r2);
        assert_eq!(r1, secret);
    }

    #[test]
    fn test_reconstruct_drops_bad_shares() {
        let group = Secp256k1Group::new();
        let secret = group.random_scalar().unwrap();
        let blind = group.random_scalar().unwrap();
        let f = BivariatePolynomial::random(group.clone(), &secret, 3).unwrap();
        let f_prime = BivariatePolynomial::random(group.clone(), &blind, 3).unwrap();
        let c = CommitmentMatrix::build(group.clone(), &f, &f_prime).unwrap();

        let mut shares: Vec<VerifiedShare<Secp256k1Group>> = (1..=5)
            .map(|i| VerifiedShare {
                index: i,
                value: f.evaluate_at_x_index(i).constant_term(),
                blinding: f_prime.evaluate_at_x_index(i).constant_term(),
            })
            .collect();
        shares[0].value += Scalar::ONE;

        let (s, s_prime) = reconstruct(&c, &shares, 3).unwrap();
        assert_eq!(s, secret);
        assert_eq!(s_prime, blind);

        assert_eq!(
            reconstruct(&c, &shares[..3], 3).unwrap_err(),
            AvssError::InsufficientShares { got: 2, need: 3 }
        );
    }
}
