// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! The dealer side of a sharing session.
//!
//! The dealer samples `f` with `f(0, 0) = s` and a blinding polynomial `f'`,
//! publishes `C = CommitmentMatrix::build(f, f')` once, and privately sends
//! participant `i` its four restrictions
//! `(f(i, y), f'(i, y), f(x, i), f'(x, i))` together with `C`.

use log::info;
use rayon::prelude::*;
use std::sync::Arc;

use crate::auth::IdentityVerifier;
use crate::commitment::CommitmentMatrix;
use crate::error::{AvssError, Result};
use crate::group::Group;
use crate::params::AvssParams;
use crate::polynomial::{BivariatePolynomial, Polynomial};

/// The private material participant `index` receives from the dealer.
#[derive(Debug, Clone)]
pub struct DealtPolynomials<G: Group> {
    pub index: u32,
    /// A_i(y) = f(i, y)
    pub a: Polynomial<G>,
    /// A'_i(y) = f'(i, y)
    pub a_prime: Polynomial<G>,
    /// B_i(x) = f(x, i)
    pub b: Polynomial<G>,
    /// B'_i(x) = f'(x, i)
    pub b_prime: Polynomial<G>,
}

impl<G: Group> DealtPolynomials<G> {
    /// Restrictions of `f` and `f_prime` for participant `index`.
    pub fn restrict(
        index: u32,
        f: &BivariatePolynomial<G>,
        f_prime: &BivariatePolynomial<G>,
    ) -> Self {
        DealtPolynomials {
            index,
            a: f.evaluate_at_x_index(index),
            a_prime: f_prime.evaluate_at_x_index(index),
            b: f.evaluate_at_y_index(index),
            b_prime: f_prime.evaluate_at_y_index(index),
        }
    }
}

/// Everything the dealer sends out in one session.
#[derive(Debug, Clone)]
pub struct Deal<G: Group> {
    pub commitment: Arc<CommitmentMatrix<G>>,
    pub polynomials: Vec<DealtPolynomials<G>>,
}

impl<G: Group> Deal<G> {
    pub fn for_participant(&self, index: u32) -> Option<&DealtPolynomials<G>> {
        self.polynomials.iter().find(|p| p.index == index)
    }
}

#[derive(Debug, Clone)]
pub struct Dealer<G: Group> {
    group: Arc<G>,
    params: AvssParams,
}

impl<G: Group> Dealer<G> {
    pub fn new(group: Arc<G>, params: AvssParams) -> Self {
        Dealer { group, params }
    }

    pub fn params(&self) -> &AvssParams {
        &self.params
    }

    /// Share `secret` among `params.total` participants.
    pub fn deal(&self, secret: &G::Scalar) -> Result<Deal<G>> {
        self.params.validate()?;
        let f = BivariatePolynomial::random(
            self.group.clone(),
            secret,
            self.params.threshold,
        )?;
        let blinding = self.group.random_scalar()?;
        let f_prime = BivariatePolynomial::random(
            self.group.clone(),
            &blinding,
            self.params.threshold,
        )?;
        self.deal_polynomials(&f, &f_prime)
    }

    /// Share a fresh random secret; returns it alongside the deal.
    pub fn deal_random(&self) -> Result<(G::Scalar, Deal<G>)> {
        let secret = self.group.random_scalar()?;
        let deal = self.deal(&secret)?;
        Ok((secret, deal))
    }

    /// Deal from explicit polynomials.
    pub fn deal_polynomials(
        &self,
        f: &BivariatePolynomial<G>,
        f_prime: &BivariatePolynomial<G>,
    ) -> Result<Deal<G>> {
        if f.threshold() != self.params.threshold {
            return Err(AvssError::DimensionMismatch {
                expected: self.params.threshold,
                actual: f.threshold(),
            });
        }
        let commitment =
            Arc::new(CommitmentMatrix::build(self.group.clone(), f, f_prime)?);
        let indices: Vec<u32> = self.params.indices().collect();
        let polynomials = indices
            .into_par_iter()
            .map(|i| DealtPolynomials::restrict(i, f, f_prime))
            .collect();
        info!(
            "dealt ({}, {}) sharing",
            self.params.threshold, self.params.total
        );
        Ok(Deal {
            commitment,
            polynomials,
        })
    }

    /// Admit the requester through `verifier`, then deal.
    pub fn deal_for<V: IdentityVerifier>(
        &self,
        verifier: &V,
        credential: &str,
        secret: &G::Scalar,
    ) -> Result<(String, Deal<G>)> {
        let id = verifier.verify_request_identity(credential)?;
        info!("session admitted {} via verifier {}", id, verifier.identifier());
        let deal = self.deal(secret)?;
        Ok((id, deal))
    }
}
