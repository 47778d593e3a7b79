// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Error kinds for the AVSS scheme.
//!
//! Verification checks never produce an error: they return `bool`, and a
//! `false` means the sender (or dealer) is treated as faulty. The variants
//! here cover precondition violations: malformed encodings, shape mismatches,
//! duplicate interpolation indices, missing entropy and illegal state
//! transitions.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvssError {
    /// Threshold / participant count out of range
    #[error("invalid parameters: threshold={threshold}, total={total} (require 1 <= threshold <= total)")]
    InvalidParams { threshold: usize, total: usize },

    /// Participant index outside `1..=n`
    #[error("invalid participant index: {0}")]
    InvalidIndex(u32),

    /// Encoding does not describe a point of the group
    #[error("invalid point encoding: {0}")]
    InvalidPoint(String),

    /// Encoding does not describe a canonical scalar
    #[error("invalid scalar encoding: {0}")]
    InvalidScalar(String),

    /// Polynomial or matrix shape does not match the threshold
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The same index appears twice in an interpolation set
    #[error("duplicate share index {0} in interpolation set")]
    DuplicateShareIndex(u32),

    #[error("insufficient shares: got {got}, need {need}")]
    InsufficientShares { got: usize, need: usize },

    #[error("scalar is not invertible modulo the group order")]
    NonInvertible,

    /// The OS random source could not be read
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// Dealt polynomials do not match the published commitment matrix
    #[error("dealer rejected: polynomials for participant {0} fail commitment check")]
    DealerRejected(u32),

    #[error("operation not allowed in state {0}")]
    InvalidState(String),

    #[error("message for participant {receiver} delivered to participant {local}")]
    Misaddressed { receiver: u32, local: u32 },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("malformed request: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, AvssError>;
