// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Pedersen commitment matrix over a pair of bivariate polynomials.
//!
//! `C[j][l] = f[j][l]*G + f'[j][l]*H`. Because the commitment is additively
//! homomorphic, `Σ_j C[j][l] * x^j` commits to the `l`-th coefficient of
//! `f(x, y)` (paired with the same coefficient of `f'(x, y)`), and
//! `Σ_{j,l} C[j][l] * x^j * y^l` commits to the point `(f(x, y), f'(x, y))`.

use rayon::prelude::*;
use std::sync::Arc;

use crate::error::{AvssError, Result};
use crate::group::Group;
use crate::polynomial::BivariatePolynomial;

#[derive(Debug, Clone)]
pub struct CommitmentMatrix<G: Group> {
    entries: Vec<Vec<G::Element>>,
    group: Arc<G>,
}

impl<G: Group> PartialEq for CommitmentMatrix<G> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<G: Group> Eq for CommitmentMatrix<G> {}

impl<G: Group> CommitmentMatrix<G> {
    /// Commit to `f` with blinding polynomial `f_prime`, one row per `j`.
    pub fn build(
        group: Arc<G>,
        f: &BivariatePolynomial<G>,
        f_prime: &BivariatePolynomial<G>,
    ) -> Result<Self> {
        let t = f.threshold();
        if f_prime.threshold() != t {
            return Err(AvssError::DimensionMismatch {
                expected: t,
                actual: f_prime.threshold(),
            });
        }
        let entries = (0..t)
            .into_par_iter()
            .map(|j| {
                (0..t)
                    .map(|l| {
                        group.commit(&f.coefficient(j, l), &f_prime.coefficient(j, l))
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        Ok(CommitmentMatrix { entries, group })
    }

    /// Wrap published entries, rejecting anything that is not square.
    pub fn from_entries(
        group: Arc<G>,
        entries: Vec<Vec<G::Element>>,
    ) -> Result<Self> {
        let t = entries.len();
        if t == 0 {
            return Err(AvssError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        if let Some(row) = entries.iter().find(|r| r.len() != t) {
            return Err(AvssError::DimensionMismatch {
                expected: t,
                actual: row.len(),
            });
        }
        Ok(CommitmentMatrix { entries, group })
    }

    pub fn threshold(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, j: usize, l: usize) -> G::Element {
        self.entries[j][l]
    }

    pub fn entries(&self) -> &[Vec<G::Element>] {
        &self.entries
    }

    pub fn group(&self) -> &Arc<G> {
        &self.group
    }

    /// C[0][0], the commitment to the secret itself.
    pub fn public_secret_commitment(&self) -> G::Element {
        self.entries[0][0]
    }

    /// Commitments to the coefficients of `f(x, y)` as a polynomial in `y`.
    pub fn evaluate_at_x(&self, x: &G::Scalar) -> Vec<G::Element> {
        let group = self.group.as_ref();
        let t = self.threshold();
        let powers = group.powers(x, t);
        (0..t)
            .map(|l| {
                let column: Vec<G::Element> =
                    self.entries.iter().map(|row| row[l]).collect();
                group.linear_combination(&column, &powers)
            })
            .collect()
    }

    /// Commitments to the coefficients of `f(x, y)` as a polynomial in `x`.
    pub fn evaluate_at_y(&self, y: &G::Scalar) -> Vec<G::Element> {
        let group = self.group.as_ref();
        let powers = group.powers(y, self.threshold());
        self.entries
            .iter()
            .map(|row| group.linear_combination(row, &powers))
            .collect()
    }

    /// Commitment to the point `(f(x, y), f'(x, y))`.
    pub fn evaluate(&self, x: &G::Scalar, y: &G::Scalar) -> G::Element {
        let group = self.group.as_ref();
        let row = self.evaluate_at_x(x);
        group.linear_combination(&row, &group.powers(y, self.threshold()))
    }

    pub fn evaluate_at_indices(&self, x: u32, y: u32) -> G::Element {
        let group = self.group.as_ref();
        self.evaluate(
            &group.scalar_from_u64(u64::from(x)),
            &group.scalar_from_u64(u64::from(y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::Secp256k1Group;

    fn setup(
        t: usize,
    ) -> (
        Arc<Secp256k1Group>,
        BivariatePolynomial<Secp256k1Group>,
        BivariatePolynomial<Secp256k1Group>,
    ) {
        let group = Secp256k1Group::new();
        let secret = group.random_scalar().unwrap();
        let blind = group.random_scalar().unwrap();
        let f = BivariatePolynomial::random(group.clone(), &secret, t).unwrap();
        let f_prime =
            BivariatePolynomial::random(group.clone(), &blind, t).unwrap();
        (group, f, f_prime)
    }

    #[test]
    fn test_pedersen_commitment_matrix() {
        let (group, f, f_prime) = setup(7);
        let c = CommitmentMatrix::build(group.clone(), &f, &f_prime).unwrap();
        assert_eq!(c.threshold(), 7);
        for j in 0..7 {
            for l in 0..7 {
                let g_fjl = group.exp(&group.generator(), &f.coefficient(j, l));
                let h_fprime_jl = group
                    .exp(&group.blinding_generator(), &f_prime.coefficient(j, l));
                assert_eq!(c.get(j, l), group.mul(&g_fjl, &h_fprime_jl));
            }
        }
        assert_eq!(
            c.public_secret_commitment(),
            group.commit(&f.secret(), &f_prime.secret())
        );
    }

    #[test]
    fn test_mismatched_threshold_rejected() {
        let (group, f, _) = setup(3);
        let (_, g, _) = setup(4);
        assert_eq!(
            CommitmentMatrix::build(group, &f, &g).unwrap_err(),
            AvssError::DimensionMismatch {
                expected: 3,
                actual: 4
            }
        );
    }

    #[test]
    fn test_from_entries_rejects_ragged() {
        let group = Secp256k1Group::new();
        let g = group.generator();
        assert!(CommitmentMatrix::from_entries(
            group.clone(),
            vec![vec![g, g], vec![g]]
        )
        .is_err());
        assert!(CommitmentMatrix::from_entries(group, vec![]).is_err());
    }

    #[test]
    fn test_homomorphic_evaluation() {
        let (group, f, f_prime) = setup(5);
        let c = CommitmentMatrix::build(group.clone(), &f, &f_prime).unwrap();
        let x = group.scalar_from_u64(4);
        let y = group.scalar_from_u64(2);

        let row = c.evaluate_at_x(&x);
        let a = f.evaluate_at_x(&x);
        let a_prime = f_prime.evaluate_at_x(&x);
        for l in 0..5 {
            assert_eq!(
                row[l],
                group.commit(&a.coefficients()[l], &a_prime.coefficients()[l])
            );
        }

        let column = c.evaluate_at_y(&y);
        let b = f.evaluate_at_y(&y);
        let b_prime = f_prime.evaluate_at_y(&y);
        for j in 0..5 {
            assert_eq!(
                column[j],
                group.commit(&b.coefficients()[j], &b_prime.coefficients()[j])
            );
        }

        assert_eq!(
            c.evaluate_at_indices(4, 2),
            group.commit(&f.eval(&x, &y), &f_prime.eval(&x, &y))
        );
    }
}
