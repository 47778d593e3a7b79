// Copyright 2020-2026 MathxH Chen.
//
// Code is licensed under MIT Apache Dual License

//! Session admission.
//!
//! Before a dealer hands out polynomials it admits the requester by checking
//! an opaque credential. This is independent of the cryptography: a verifier
//! only maps a credential to a claimed participant identifier.

use log::{debug, warn};
use serde::Deserialize;

use crate::error::{AvssError, Result};

pub trait IdentityVerifier {
    /// Name of the verifier, e.g. `"test"`.
    fn identifier(&self) -> &str;

    /// Normalize an incoming token so the same credential always compares
    /// equal.
    fn clean_token(&self, token: &str) -> String;

    /// Validate a raw JSON credential and return the claimed identifier.
    fn verify_request_identity(&self, raw: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct TokenParams {
    id_token: String,
    id: String,
}

/// Accepts exactly one token value; the claimed `id` is passed through.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    correct_id: String,
}

impl TokenVerifier {
    pub fn new(correct_id: impl Into<String>) -> Self {
        TokenVerifier {
            correct_id: correct_id.into(),
        }
    }
}

impl IdentityVerifier for TokenVerifier {
    fn identifier(&self) -> &str {
        "test"
    }

    fn clean_token(&self, token: &str) -> String {
        token.trim_matches(' ').to_string()
    }

    fn verify_request_identity(&self, raw: &str) -> Result<String> {
        let params: TokenParams = serde_json::from_str(raw)
            .map_err(|e| AvssError::Malformed(e.to_string()))?;
        if self.clean_token(&params.id_token) != self.correct_id {
            warn!("verifier {}: token rejected for {}", self.identifier(), params.id);
            return Err(AvssError::Unauthorized(format!(
                "token for {} is not valid",
                params.id
            )));
        }
        debug!("verifier {}: admitted {}", self.identifier(), params.id);
        Ok(params.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verifier_accepts_correct_token() {
        let verifier = TokenVerifier::new("blublu");
        let id = verifier
            .verify_request_identity(r#"{"id_token": "  blublu ", "id": "node-3"}"#)
            .unwrap();
        assert_eq!(id, "node-3");
        assert_eq!(verifier.identifier(), "test");
    }

    #[test]
    fn test_verifier_rejects_wrong_token() {
        let verifier = TokenVerifier::new("blublu");
        let result = verifier
            .verify_request_identity(r#"{"id_token": "other", "id": "node-3"}"#);
        assert!(matches!(result, Err(AvssError::Unauthorized(_))));
    }

    #[test]
    fn test_verifier_rejects_malformed_json() {
        let verifier = TokenVerifier::new("blublu");
        let result = verifier.verify_request_identity(r#"{"id": 3"#);
        assert!(matches!(result, Err(AvssError::Malformed(_))));
    }

    #[test]
    fn test_clean_token_only_trims_spaces() {
        let verifier = TokenVerifier::new("x");
        assert_eq!(verifier.clean_token("  abc  "), "abc");
        assert_eq!(verifier.clean_token("\tabc"), "\tabc");
    }
}
