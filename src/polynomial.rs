// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Univariate and bivariate polynomials over the scalar field.
//!
//! The dealer samples a bivariate polynomial
//! `f(x, y) = Σ_j Σ_l f[j][l] * x^j * y^l` of degree `t - 1` in each variable
//! with `f[0][0] = s`. Participant `i` receives the two restrictions
//! `A_i(y) = f(i, y)` and `B_i(x) = f(x, i)`, and for any pair of participants
//! `A_i(m) = B_m(i) = f(i, m)`. That symmetry is what peers cross-check.

use std::sync::Arc;

use crate::error::{AvssError, Result};
use crate::group::Group;

/// Secret Shares on Polynomial, (t,n) threshold scheme
/// P(x) = a_0*x^0 + a_1*x^1 + a_2*x^2 + ... + a_(t-1)*x^(t-1)
/// degree is t - 1
#[derive(Debug, Clone)]
pub struct Polynomial<G: Group> {
    coefficients: Vec<G::Scalar>,
    group: Arc<G>,
}

impl<G: Group> PartialEq for Polynomial<G> {
    fn eq(&self, other: &Self) -> bool {
        self.coefficients == other.coefficients
    }
}

impl<G: Group> Polynomial<G> {
    /// Wrap a coefficient vector, lowest degree first.
    pub fn from_coefficients(
        group: Arc<G>,
        coefficients: Vec<G::Scalar>,
    ) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(AvssError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Polynomial {
            coefficients,
            group,
        })
    }

    /// Random polynomial of the given degree, every coefficient uniform.
    pub fn random(group: Arc<G>, degree: usize) -> Result<Self> {
        // [0,degree] not [0,degree)
        let coefficients = (0..=degree)
            .map(|_| group.random_scalar())
            .collect::<Result<Vec<_>>>()?;
        Polynomial::from_coefficients(group, coefficients)
    }

    pub fn coefficients(&self) -> &[G::Scalar] {
        &self.coefficients
    }

    /// Number of coefficients, `t` for a dealt restriction.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// P(0)
    pub fn constant_term(&self) -> G::Scalar {
        self.coefficients[0]
    }

    /// Get P(x) by Horner's rule, mod order.
    pub fn eval(&self, x: &G::Scalar) -> G::Scalar {
        let group = self.group.as_ref();
        self.coefficients
            .iter()
            .rev()
            .fold(group.scalar_from_u64(0), |acc, c| {
                group.scalar_add(&group.scalar_mul(&acc, x), c)
            })
    }

    /// P(index) for a participant index.
    pub fn eval_at_index(&self, index: u32) -> G::Scalar {
        self.eval(&self.group.scalar_from_u64(u64::from(index)))
    }

    /// Copy with one coefficient replaced; useful to model a cheating dealer.
    pub fn with_coefficient(&self, position: usize, value: G::Scalar) -> Self {
        let mut coefficients = self.coefficients.clone();
        if let Some(c) = coefficients.get_mut(position) {
            *c = value;
        }
        Polynomial {
            coefficients,
            group: self.group.clone(),
        }
    }
}

/// A `t x t` coefficient matrix `f[j][l]` of `f(x, y)`.
#[derive(Debug, Clone)]
pub struct BivariatePolynomial<G: Group> {
    coefficients: Vec<Vec<G::Scalar>>,
    group: Arc<G>,
}

impl<G: Group> BivariatePolynomial<G> {
    /// Random `t x t` polynomial with `f[0][0] = secret`.
    pub fn random(
        group: Arc<G>,
        secret: &G::Scalar,
        threshold: usize,
    ) -> Result<Self> {
        if threshold == 0 {
            return Err(AvssError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let mut coefficients = Vec::with_capacity(threshold);
        for j in 0..threshold {
            let mut row = Vec::with_capacity(threshold);
            for l in 0..threshold {
                if j == 0 && l == 0 {
                    row.push(*secret);
                } else {
                    row.push(group.random_scalar()?);
                }
            }
            coefficients.push(row);
        }
        Ok(BivariatePolynomial {
            coefficients,
            group,
        })
    }

    /// Wrap an explicit matrix, rejecting anything that is not square.
    pub fn from_coefficients(
        group: Arc<G>,
        coefficients: Vec<Vec<G::Scalar>>,
    ) -> Result<Self> {
        let threshold = coefficients.len();
        if threshold == 0 {
            return Err(AvssError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        if let Some(row) = coefficients.iter().find(|r| r.len() != threshold)
        {
            return Err(AvssError::DimensionMismatch {
                expected: threshold,
                actual: row.len(),
            });
        }
        Ok(BivariatePolynomial {
            coefficients,
            group,
        })
    }

    /// `t`, the size of each dimension.
    pub fn threshold(&self) -> usize {
        self.coefficients.len()
    }

    /// f[j][l], the coefficient of `x^j * y^l`.
    pub fn coefficient(&self, j: usize, l: usize) -> G::Scalar {
        self.coefficients[j][l]
    }

    pub fn rows(&self) -> &[Vec<G::Scalar>] {
        &self.coefficients
    }

    /// f(0, 0)
    pub fn secret(&self) -> G::Scalar {
        self.coefficients[0][0]
    }

    /// f(x0, y) as a polynomial in `y`: `c_l = Σ_j f[j][l] * x0^j`.
    pub fn evaluate_at_x(&self, x0: &G::Scalar) -> Polynomial<G> {
        let group = self.group.as_ref();
        let t = self.threshold();
        let powers = group.powers(x0, t);
        let coefficients = (0..t)
            .map(|l| {
                (0..t).fold(group.scalar_from_u64(0), |acc, j| {
                    group.scalar_add(
                        &acc,
                        &group.scalar_mul(&self.coefficients[j][l], &powers[j]),
                    )
                })
            })
            .collect();
        Polynomial {
            coefficients,
            group: self.group.clone(),
        }
    }

    /// f(x, y0) as a polynomial in `x`: `c_j = Σ_l f[j][l] * y0^l`.
    pub fn evaluate_at_y(&self, y0: &G::Scalar) -> Polynomial<G> {
        let group = self.group.as_ref();
        let t = self.threshold();
        let powers = group.powers(y0, t);
        let coefficients = self
            .coefficients
            .iter()
            .map(|row| {
                row.iter().zip(powers.iter()).fold(
                    group.scalar_from_u64(0),
                    |acc, (c, p)| group.scalar_add(&acc, &group.scalar_mul(c, p)),
                )
            })
            .collect();
        Polynomial {
            coefficients,
            group: self.group.clone(),
        }
    }

    pub fn evaluate_at_x_index(&self, index: u32) -> Polynomial<G> {
        self.evaluate_at_x(&self.group.scalar_from_u64(u64::from(index)))
    }

    pub fn evaluate_at_y_index(&self, index: u32) -> Polynomial<G> {
        self.evaluate_at_y(&self.group.scalar_from_u64(u64::from(index)))
    }

    /// f(x, y)
    pub fn eval(&self, x: &G::Scalar, y: &G::Scalar) -> G::Scalar {
        self.evaluate_at_x(x).eval(y)
    }
}
