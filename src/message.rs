// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Echo / Ready protocol messages.
//!
//! Both rounds carry the same payload: the four cross-evaluated scalars the
//! sender `m` computes for the receiver `i` from its own dealt polynomials,
//! plus a shared reference to the commitment matrix.
//!
//! - `a = A_m(i) = f(m, i)`, `a_prime = f'(m, i)`
//! - `b = B_m(i) = f(i, m)`, `b_prime = f'(i, m)`

use std::fmt;
use std::sync::Arc;

use crate::commitment::CommitmentMatrix;
use crate::group::Group;
use crate::verify::verify_point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Round {
    Echo,
    Ready,
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Round::Echo => write!(f, "echo"),
            Round::Ready => write!(f, "ready"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrossPoints<G: Group> {
    pub sender: u32,
    pub receiver: u32,
    pub commitment: Arc<CommitmentMatrix<G>>,
    pub a: G::Scalar,
    pub a_prime: G::Scalar,
    pub b: G::Scalar,
    pub b_prime: G::Scalar,
}

impl<G: Group> CrossPoints<G> {
    /// `verify_point` at `(sender, receiver)` against the carried matrix.
    pub fn verify(&self) -> bool {
        verify_point(
            &self.commitment,
            self.sender,
            self.receiver,
            &self.a,
            &self.a_prime,
            &self.b,
            &self.b_prime,
        )
    }
}

#[derive(Debug, Clone)]
pub enum ProtocolMessage<G: Group> {
    Echo(CrossPoints<G>),
    Ready(CrossPoints<G>),
}

impl<G: Group> ProtocolMessage<G> {
    pub fn new(round: Round, payload: CrossPoints<G>) -> Self {
        match round {
            Round::Echo => ProtocolMessage::Echo(payload),
            Round::Ready => ProtocolMessage::Ready(payload),
        }
    }

    pub fn round(&self) -> Round {
        match self {
            ProtocolMessage::Echo(_) => Round::Echo,
            ProtocolMessage::Ready(_) => Round::Ready,
        }
    }

    pub fn payload(&self) -> &CrossPoints<G> {
        match self {
            ProtocolMessage::Echo(p) | ProtocolMessage::Ready(p) => p,
        }
    }

    pub fn payload_mut(&mut self) -> &mut CrossPoints<G> {
        match self {
            ProtocolMessage::Echo(p) | ProtocolMessage::Ready(p) => p,
        }
    }

    pub fn sender(&self) -> u32 {
        self.payload().sender
    }

    pub fn receiver(&self) -> u32 {
        self.payload().receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::Secp256k1Group;
    use crate::polynomial::BivariatePolynomial;
    use k256::Scalar;

    fn cross_points(m: u32, i: u32) -> CrossPoints<Secp256k1Group> {
        let group = Secp256k1Group::new();
        let s = group.random_scalar().unwrap();
        let f = BivariatePolynomial::random(group.clone(), &s, 3).unwrap();
        let f_prime = BivariatePolynomial::random(group.clone(), &s, 3).unwrap();
        let commitment =
            Arc::new(CommitmentMatrix::build(group, &f, &f_prime).unwrap());
        CrossPoints {
            sender: m,
            receiver: i,
            commitment,
            a: f.evaluate_at_x_index(m).eval_at_index(i),
            a_prime: f_prime.evaluate_at_x_index(m).eval_at_index(i),
            b: f.evaluate_at_x_index(i).eval_at_index(m),
            b_prime: f_prime.evaluate_at_x_index(i).eval_at_index(m),
        }
    }

    #[test]
    fn test_round_tagging() {
        let payload = cross_points(2, 5);
        let echo = ProtocolMessage::new(Round::Echo, payload.clone());
        let ready = ProtocolMessage::new(Round::Ready, payload);
        assert_eq!(echo.round(), Round::Echo);
        assert_eq!(ready.round(), Round::Ready);
        assert_eq!(echo.sender(), 2);
        assert_eq!(ready.receiver(), 5);
        assert_eq!(Round::Ready.to_string(), "ready");
    }

    #[test]
    fn test_cross_points_verify() {
        let payload = cross_points(3, 1);
        assert!(payload.verify());

        let mut swapped = payload.clone();
        std::mem::swap(&mut swapped.sender, &mut swapped.receiver);
        assert!(!swapped.verify());

        let mut msg = ProtocolMessage::Ready(payload);
        msg.payload_mut().b_prime += Scalar::ONE;
        assert!(!msg.payload().verify());
    }
}
