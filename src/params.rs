// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Session parameters.
//!
//! A `(t, n)` sharing deals to `n` participants; every bivariate polynomial is
//! `t x t` (degree `t - 1` in each variable), so any `t` verified shares
//! reconstruct the secret and `t` valid Echo / Ready messages form a quorum.

use serde::{Deserialize, Serialize};

use crate::error::{AvssError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvssParams {
    /// Number of shares needed to reconstruct, also the quorum size.
    pub threshold: usize,
    /// Number of participants.
    pub total: usize,
}

impl AvssParams {
    /// Validated constructor, `1 <= threshold <= total`.
    pub fn new(threshold: usize, total: usize) -> Result<Self> {
        let params = AvssParams { threshold, total };
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a JSON document such as
    /// `{"threshold": 7, "total": 9}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: AvssParams = serde_json::from_str(json)
            .map_err(|e| AvssError::Malformed(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0
            || self.threshold > self.total
            || self.total > u32::MAX as usize
        {
            return Err(AvssError::InvalidParams {
                threshold: self.threshold,
                total: self.total,
            });
        }
        Ok(())
    }

    /// Participant indices `1..=n`.
    pub fn indices(&self) -> impl Iterator<Item = u32> {
        1..=(self.total as u32)
    }

    pub fn contains(&self, index: u32) -> bool {
        index >= 1 && (index as usize) <= self.total
    }
}
