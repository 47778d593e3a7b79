// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Stateless checks tying dealt values back to the commitment matrix.
//!
//! Conventions, for participant `i`:
//! - `A_i(y) = f(i, y)` and `A'_i(y) = f'(i, y)`
//! - `B_i(x) = f(x, i)` and `B'_i(x) = f'(x, i)`
//!
//! All checks are pure, never panic, and return `false` on any mismatch,
//! including inputs of the wrong length. A `false` marks the dealer or peer
//! as faulty; it is not an error.

use crate::commitment::CommitmentMatrix;
use crate::group::Group;
use crate::polynomial::Polynomial;

fn pairs_match<G: Group>(
    group: &G,
    expected: &[G::Element],
    values: &Polynomial<G>,
    blindings: &Polynomial<G>,
) -> bool {
    if values.len() != expected.len() || blindings.len() != expected.len() {
        return false;
    }
    expected
        .iter()
        .zip(values.coefficients().iter().zip(blindings.coefficients()))
        .all(|(c, (v, b))| group.commit(v, b) == *c)
}

/// Checks the four restricted polynomials the dealer sent to participant `i`.
///
/// - Row check: `commit(A_i[l], A'_i[l]) == Σ_j C[j][l] * i^j` for every `l`
/// - Column check: `commit(B_i[j], B'_i[j]) == Σ_l C[j][l] * i^l` for every `j`
pub fn verify_poly<G: Group>(
    commitment: &CommitmentMatrix<G>,
    index: u32,
    a: &Polynomial<G>,
    a_prime: &Polynomial<G>,
    b: &Polynomial<G>,
    b_prime: &Polynomial<G>,
) -> bool {
    let group = commitment.group().as_ref();
    let i = group.scalar_from_u64(u64::from(index));

    let row = commitment.evaluate_at_x(&i);
    if !pairs_match(group, &row, a, a_prime) {
        return false;
    }
    let column = commitment.evaluate_at_y(&i);
    pairs_match(group, &column, b, b_prime)
}

/// Checks the cross points participant `m` computed for participant `i`:
/// `(alpha, alpha')` must open `C` at `(m, i)` and `(beta, beta')` must open
/// `C` at `(i, m)`.
#[allow(clippy::too_many_arguments)]
pub fn verify_point<G: Group>(
    commitment: &CommitmentMatrix<G>,
    m: u32,
    i: u32,
    alpha: &G::Scalar,
    alpha_prime: &G::Scalar,
    beta: &G::Scalar,
    beta_prime: &G::Scalar,
) -> bool {
    let group = commitment.group().as_ref();
    group.commit(alpha, alpha_prime) == commitment.evaluate_at_indices(m, i)
        && group.commit(beta, beta_prime)
            == commitment.evaluate_at_indices(i, m)
}

/// Checks a final share `sigma = f(i, 0)`:
/// `commit(sigma, sigma') == Σ_j C[j][0] * i^j`.
pub fn verify_share<G: Group>(
    commitment: &CommitmentMatrix<G>,
    index: u32,
    sigma: &G::Scalar,
    sigma_prime: &G::Scalar,
) -> bool {
    let group = commitment.group().as_ref();
    let i = group.scalar_from_u64(u64::from(index));
    let first_column: Vec<G::Element> =
        commitment.entries().iter().map(|row| row[0]).collect();
    let expected = group.linear_combination(
        &first_column,
        &group.powers(&i, commitment.threshold()),
    );
    group.commit(sigma, sigma_prime) == expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::Secp256k1Group;
    use crate::polynomial::BivariatePolynomial;
    use std::sync::Arc;

    struct Setup {
        group: Arc<Secp256k1Group>,
        f: BivariatePolynomial<Secp256k1Group>,
        f_prime: BivariatePolynomial<Secp256k1Group>,
        c: CommitmentMatrix<Secp256k1Group>,
    }

    impl Setup {
        // dealer chooses two bivar polys, f and f_prime, and commits to them
        fn new(threshold: usize) -> Self {
            let group = Secp256k1Group::new();
            let secret = group.random_scalar().unwrap();
            let blind = group.random_scalar().unwrap();
            let f = BivariatePolynomial::random(group.clone(), &secret, threshold)
                .unwrap();
            let f_prime =
                BivariatePolynomial::random(group.clone(), &blind, threshold)
                    .unwrap();
            let c = CommitmentMatrix::build(group.clone(), &f, &f_prime).unwrap();
            Setup {
                group,
                f,
                f_prime,
                c,
            }
        }
    }

    #[test]
    fn test_avss_verify_poly() {
        let s = Setup::new(7);
        for index in 1..=9 {
            let a = s.f.evaluate_at_x_index(index);
            let a_prime = s.f_prime.evaluate_at_x_index(index);
            let b = s.f.evaluate_at_y_index(index);
            let b_prime = s.f_prime.evaluate_at_y_index(index);
            assert!(verify_poly(&s.c, index, &a, &a_prime, &b, &b_prime));
        }
    }

    #[test]
    fn test_avss_verify_poly_detects_any_tampered_coefficient() {
        let s = Setup::new(4);
        let index = 5;
        let a = s.f.evaluate_at_x_index(index);
        let a_prime = s.f_prime.evaluate_at_x_index(index);
        let b = s.f.evaluate_at_y_index(index);
        let b_prime = s.f_prime.evaluate_at_y_index(index);
        let one = s.group.scalar_from_u64(1);

        for pos in 0..4 {
            let bump = |p: &Polynomial<Secp256k1Group>| {
                p.with_coefficient(pos, s.group.scalar_add(&p.coefficients()[pos], &one))
            };
            assert!(!verify_poly(&s.c, index, &bump(&a), &a_prime, &b, &b_prime));
            assert!(!verify_poly(&s.c, index, &a, &bump(&a_prime), &b, &b_prime));
            assert!(!verify_poly(&s.c, index, &a, &a_prime, &bump(&b), &b_prime));
            assert!(!verify_poly(&s.c, index, &a, &a_prime, &b, &bump(&b_prime)));
        }
    }

    #[test]
    fn test_avss_verify_poly_wrong_index_or_length() {
        let s = Setup::new(3);
        let a = s.f.evaluate_at_x_index(2);
        let a_prime = s.f_prime.evaluate_at_x_index(2);
        let b = s.f.evaluate_at_y_index(2);
        let b_prime = s.f_prime.evaluate_at_y_index(2);
        assert!(!verify_poly(&s.c, 3, &a, &a_prime, &b, &b_prime));

        let short = Polynomial::from_coefficients(
            s.group.clone(),
            a.coefficients()[..2].to_vec(),
        )
        .unwrap();
        assert!(!verify_poly(&s.c, 2, &short, &a_prime, &b, &b_prime));
    }

    #[test]
    fn test_avss_verify_point() {
        let s = Setup::new(7);
        let (m, i) = (3, 5);
        let alpha = s.f.evaluate_at_x_index(m).eval_at_index(i);
        let alpha_prime = s.f_prime.evaluate_at_x_index(m).eval_at_index(i);
        let beta = s.f.evaluate_at_x_index(i).eval_at_index(m);
        let beta_prime = s.f_prime.evaluate_at_x_index(i).eval_at_index(m);
        assert!(verify_point(
            &s.c,
            m,
            i,
            &alpha,
            &alpha_prime,
            &beta,
            &beta_prime
        ));

        let one = s.group.scalar_from_u64(1);
        let bad = s.group.scalar_add(&alpha, &one);
        assert!(!verify_point(&s.c, m, i, &bad, &alpha_prime, &beta, &beta_prime));
        let bad = s.group.scalar_add(&alpha_prime, &one);
        assert!(!verify_point(&s.c, m, i, &alpha, &bad, &beta, &beta_prime));
        let bad = s.group.scalar_add(&beta, &one);
        assert!(!verify_point(&s.c, m, i, &alpha, &alpha_prime, &bad, &beta_prime));
        let bad = s.group.scalar_add(&beta_prime, &one);
        assert!(!verify_point(&s.c, m, i, &alpha, &alpha_prime, &beta, &bad));
        // swapped roles
        assert!(!verify_point(
            &s.c,
            i,
            m,
            &alpha,
            &alpha_prime,
            &beta,
            &beta_prime
        ));
    }

    #[test]
    fn test_avss_verify_share() {
        let s = Setup::new(7);
        for index in 1..=9 {
            let sigma = s.f.evaluate_at_x_index(index).eval_at_index(0);
            let sigma_prime = s.f_prime.evaluate_at_x_index(index).eval_at_index(0);
            assert!(verify_share(&s.c, index, &sigma, &sigma_prime));
            assert!(!verify_share(&s.c, index + 1, &sigma, &sigma_prime));

            let one = s.group.scalar_from_u64(1);
            let bad_sigma = s.group.scalar_add(&sigma, &one);
            let bad_sigma_prime = s.group.scalar_add(&sigma_prime, &one);
            assert!(!verify_share(&s.c, index, &bad_sigma, &sigma_prime));
            assert!(!verify_share(&s.c, index, &sigma, &bad_sigma_prime));
        }
    }
}
