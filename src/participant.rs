// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! One party in an AVSS session.
//!
//! A participant verifies what the dealer sent it, cross-checks every peer
//! through Echo messages, confirms through Ready messages, and ends up holding
//! a verified share `(f(i, 0), f'(i, 0))`.
//!
//! # States
//! - **Init**: nothing received from the dealer yet; peer messages are buffered.
//! - **AwaitingDealerVerification**: dealt polynomials are being checked.
//! - **AwaitingEchoes**: Echo sent to every peer, collecting valid Echoes.
//! - **AwaitingReadys**: `t` valid Echoes seen, Ready sent, collecting Readys.
//! - **Complete**: `t` valid Readys seen; the share is verified.
//! - **Aborted**: dealer rejected or session cancelled.
//!
//! A participant counts its own Echo and Ready toward the quorums, so `n`
//! messages per round are possible and any `t` of them suffice.
//!
//! A peer message that fails verification marks its sender faulty and is
//! dropped; it never aborts the session.

use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::commitment::CommitmentMatrix;
use crate::dealer::DealtPolynomials;
use crate::error::{AvssError, Result};
use crate::group::Group;
use crate::lagrange::VerifiedShare;
use crate::message::{CrossPoints, ProtocolMessage, Round};
use crate::params::AvssParams;
use crate::verify::verify_poly;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Init,
    AwaitingDealerVerification,
    AwaitingEchoes,
    AwaitingReadys,
    Complete,
    Aborted,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeState::Init => "INIT",
            NodeState::AwaitingDealerVerification => {
                "AWAITING_DEALER_VERIFICATION"
            }
            NodeState::AwaitingEchoes => "AWAITING_ECHOES",
            NodeState::AwaitingReadys => "AWAITING_READYS",
            NodeState::Complete => "COMPLETE",
            NodeState::Aborted => "ABORTED",
        };
        write!(f, "{}", name)
    }
}

/// A participant represents one node of the sharing session, identified by
/// its index `1..=n`.
#[derive(Debug, Clone)]
pub struct Participant<G: Group> {
    group: Arc<G>,
    params: AvssParams,
    index: u32,
    state: NodeState,
    commitment: Option<Arc<CommitmentMatrix<G>>>,
    polynomials: Option<DealtPolynomials<G>>,
    echoes: BTreeMap<u32, CrossPoints<G>>,
    readys: BTreeMap<u32, CrossPoints<G>>,
    seen: BTreeSet<(u32, Round)>,
    faulty: BTreeSet<u32>,
    /// Messages received before the deal, first copy per `(sender, round)`.
    pending: BTreeMap<(u32, Round), ProtocolMessage<G>>,
}

impl<G: Group> Participant<G> {
    /// Create participant `index` of a session described by `params`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use avss_rs::groups::Secp256k1Group;
    /// use avss_rs::{AvssParams, NodeState, Participant};
    ///
    /// let group = Secp256k1Group::new();
    /// let params = AvssParams::new(3, 4).unwrap();
    /// let p1 = Participant::new(group, params, 1).unwrap();
    /// assert_eq!(p1.state(), NodeState::Init);
    /// ```
    pub fn new(group: Arc<G>, params: AvssParams, index: u32) -> Result<Self> {
        params.validate()?;
        if !params.contains(index) {
            return Err(AvssError::InvalidIndex(index));
        }
        Ok(Participant {
            group,
            params,
            index,
            state: NodeState::Init,
            commitment: None,
            polynomials: None,
            echoes: BTreeMap::new(),
            readys: BTreeMap::new(),
            seen: BTreeSet::new(),
            faulty: BTreeSet::new(),
            pending: BTreeMap::new(),
        })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn params(&self) -> &AvssParams {
        &self.params
    }

    pub fn commitment(&self) -> Option<&Arc<CommitmentMatrix<G>>> {
        self.commitment.as_ref()
    }

    /// Peers that sent at least one message failing verification.
    pub fn faulty(&self) -> &BTreeSet<u32> {
        &self.faulty
    }

    pub fn is_faulty(&self, peer: u32) -> bool {
        self.faulty.contains(&peer)
    }

    /// Number of messages waiting for the deal.
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    /// Valid Echoes, including this participant's own.
    pub fn valid_echoes(&self) -> usize {
        self.echoes.len()
    }

    pub fn valid_readys(&self) -> usize {
        self.readys.len()
    }

    /// The verified share, available once the session is complete.
    pub fn share(&self) -> Option<VerifiedShare<G>> {
        if self.state != NodeState::Complete {
            return None;
        }
        self.polynomials.as_ref().map(|p| VerifiedShare {
            index: self.index,
            value: p.a.constant_term(),
            blinding: p.a_prime.constant_term(),
        })
    }

    fn transition(&mut self, to: NodeState) {
        info!("participant {}: {} -> {}", self.index, self.state, to);
        self.state = to;
    }

    /// Accept the dealer's commitment matrix and polynomials.
    ///
    /// Returns the Echo messages for every peer, followed by anything produced
    /// by replaying messages that arrived before the deal. If the polynomials
    /// do not match the commitment matrix the participant aborts and the
    /// dealer is reported through `AvssError::DealerRejected`.
    pub fn receive_deal(
        &mut self,
        commitment: Arc<CommitmentMatrix<G>>,
        polynomials: DealtPolynomials<G>,
    ) -> Result<Vec<ProtocolMessage<G>>> {
        if self.state != NodeState::Init {
            return Err(AvssError::InvalidState(self.state.to_string()));
        }
        if polynomials.index != self.index {
            return Err(AvssError::Misaddressed {
                receiver: polynomials.index,
                local: self.index,
            });
        }
        self.transition(NodeState::AwaitingDealerVerification);

        let consistent = commitment.threshold() == self.params.threshold
            && verify_poly(
                &commitment,
                self.index,
                &polynomials.a,
                &polynomials.a_prime,
                &polynomials.b,
                &polynomials.b_prime,
            );
        if !consistent {
            warn!(
                "participant {}: dealt polynomials do not match commitments",
                self.index
            );
            self.abort();
            return Err(AvssError::DealerRejected(self.index));
        }

        self.commitment = Some(commitment);
        self.polynomials = Some(polynomials);
        self.transition(NodeState::AwaitingEchoes);

        let mut outgoing = self.broadcast(Round::Echo);
        outgoing.extend(self.advance());
        let pending: Vec<_> =
            std::mem::take(&mut self.pending).into_values().collect();
        if !pending.is_empty() {
            debug!(
                "participant {}: replaying {} buffered messages",
                self.index,
                pending.len()
            );
            outgoing.extend(self.process_batch(pending));
        }
        Ok(outgoing)
    }

    /// Cross points this participant computes for `receiver`:
    /// `(f(i, r), f'(i, r), f(r, i), f'(r, i))`.
    pub fn cross_points_for(&self, receiver: u32) -> Option<CrossPoints<G>> {
        let p = self.polynomials.as_ref()?;
        let commitment = self.commitment.as_ref()?;
        Some(CrossPoints {
            sender: self.index,
            receiver,
            commitment: commitment.clone(),
            a: p.a.eval_at_index(receiver),
            a_prime: p.a_prime.eval_at_index(receiver),
            b: p.b.eval_at_index(receiver),
            b_prime: p.b_prime.eval_at_index(receiver),
        })
    }

    /// Record this participant's own cross points for `round`, then build the
    /// messages for every peer.
    fn broadcast(&mut self, round: Round) -> Vec<ProtocolMessage<G>> {
        if let Some(own) = self.cross_points_for(self.index) {
            self.seen.insert((self.index, round));
            match round {
                Round::Echo => self.echoes.insert(self.index, own),
                Round::Ready => self.readys.insert(self.index, own),
            };
        }
        self.params
            .indices()
            .filter(|peer| *peer != self.index)
            .filter_map(|peer| self.cross_points_for(peer))
            .map(|payload| ProtocolMessage::new(round, payload))
            .collect()
    }

    fn precheck(&self, msg: &ProtocolMessage<G>) -> Result<()> {
        if msg.receiver() != self.index {
            return Err(AvssError::Misaddressed {
                receiver: msg.receiver(),
                local: self.index,
            });
        }
        let sender = msg.sender();
        if sender == self.index || !self.params.contains(sender) {
            return Err(AvssError::InvalidIndex(sender));
        }
        if self.state == NodeState::Aborted {
            return Err(AvssError::InvalidState(self.state.to_string()));
        }
        Ok(())
    }

    /// Pure check of a peer message against the commitment matrix and this
    /// participant's own polynomials.
    ///
    /// Sender `m` claims `a = f(m, i)` and `b = f(i, m)`; locally
    /// `B_i(m) = f(m, i)` and `A_i(m) = f(i, m)`.
    fn check(&self, msg: &ProtocolMessage<G>) -> bool {
        let (Some(commitment), Some(own)) =
            (self.commitment.as_ref(), self.polynomials.as_ref())
        else {
            return false;
        };
        let payload = msg.payload();
        let same_matrix = Arc::ptr_eq(commitment, &payload.commitment)
            || **commitment == *payload.commitment;
        if !same_matrix || !payload.verify() {
            return false;
        }
        let m = payload.sender;
        own.b.eval_at_index(m) == payload.a
            && own.b_prime.eval_at_index(m) == payload.a_prime
            && own.a.eval_at_index(m) == payload.b
            && own.a_prime.eval_at_index(m) == payload.b_prime
    }

    fn apply(
        &mut self,
        msg: ProtocolMessage<G>,
        valid: bool,
    ) -> Vec<ProtocolMessage<G>> {
        let round = msg.round();
        let sender = msg.sender();
        if !self.seen.insert((sender, round)) {
            debug!(
                "participant {}: duplicate {} from {} ignored",
                self.index, round, sender
            );
            return Vec::new();
        }
        if !valid {
            warn!(
                "participant {}: invalid {} from {}, marking faulty",
                self.index, round, sender
            );
            self.faulty.insert(sender);
            return Vec::new();
        }
        match msg {
            ProtocolMessage::Echo(payload) => {
                self.echoes.insert(sender, payload);
            }
            ProtocolMessage::Ready(payload) => {
                self.readys.insert(sender, payload);
            }
        }
        self.advance()
    }

    fn advance(&mut self) -> Vec<ProtocolMessage<G>> {
        let threshold = self.params.threshold;
        let mut outgoing = Vec::new();
        if self.state == NodeState::AwaitingEchoes
            && self.echoes.len() >= threshold
        {
            self.transition(NodeState::AwaitingReadys);
            outgoing = self.broadcast(Round::Ready);
        }
        if self.state == NodeState::AwaitingReadys
            && self.readys.len() >= threshold
        {
            self.transition(NodeState::Complete);
        }
        outgoing
    }

    fn process_batch(
        &mut self,
        messages: Vec<ProtocolMessage<G>>,
    ) -> Vec<ProtocolMessage<G>> {
        let checks: Vec<bool> =
            messages.par_iter().map(|m| self.check(m)).collect();
        let mut outgoing = Vec::new();
        for (msg, valid) in messages.into_iter().zip(checks) {
            outgoing.extend(self.apply(msg, valid));
        }
        outgoing
    }

    fn buffer(&mut self, msg: ProtocolMessage<G>) {
        let key = (msg.sender(), msg.round());
        if self.pending.contains_key(&key) {
            debug!(
                "participant {}: duplicate {} from {} before deal ignored",
                self.index, key.1, key.0
            );
            return;
        }
        self.pending.insert(key, msg);
    }

    /// Process one Echo or Ready addressed to this participant.
    ///
    /// Returns the messages to send in response (the Ready broadcast when the
    /// Echo quorum is reached, otherwise nothing).
    pub fn handle_message(
        &mut self,
        msg: ProtocolMessage<G>,
    ) -> Result<Vec<ProtocolMessage<G>>> {
        self.precheck(&msg)?;
        if self.state == NodeState::Init {
            self.buffer(msg);
            return Ok(Vec::new());
        }
        let valid = self.check(&msg);
        Ok(self.apply(msg, valid))
    }

    /// Process a batch of messages. Verification of distinct messages runs
    /// in parallel; results are applied in the given order.
    ///
    /// The batch is rejected as a whole if any message is misaddressed.
    pub fn handle_messages(
        &mut self,
        messages: Vec<ProtocolMessage<G>>,
    ) -> Result<Vec<ProtocolMessage<G>>> {
        for msg in &messages {
            self.precheck(msg)?;
        }
        if self.state == NodeState::Init {
            for msg in messages {
                self.buffer(msg);
            }
            return Ok(Vec::new());
        }
        Ok(self.process_batch(messages))
    }

    /// Cancel the session, discarding polynomials and inboxes.
    pub fn abort(&mut self) {
        if self.state != NodeState::Aborted {
            self.transition(NodeState::Aborted);
        }
        self.polynomials = None;
        self.echoes.clear();
        self.readys.clear();
        self.pending.clear();
    }

    /// Group the participant computes in.
    pub fn group(&self) -> &Arc<G> {
        &self.group
    }
}
