//! Response envelopes. Every non-2xx answer carries `{ "msg": ... }`.

use serde::{Deserialize, Serialize};

/// `msg` of a 401 for a request without a token.
pub const MISSING_TOKEN_MSG: &str = "No token, authorization denied";
/// `msg` of a 401 for a malformed, forged or expired token.
pub const INVALID_TOKEN_MSG: &str = "Token is not valid";

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub msg: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }

    /// Whether this is a 401 caused by the token itself, as opposed to an
    /// ownership refusal.
    pub fn is_token_failure(&self) -> bool {
        self.msg == MISSING_TOKEN_MSG || self.msg == INVALID_TOKEN_MSG
    }

    pub fn server_error() -> Self {
        Self::new("Server Error")
    }
}

/// Plain acknowledgement body, e.g. after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures_are_told_apart_from_refusals() {
        assert!(ErrorResponse::new(MISSING_TOKEN_MSG).is_token_failure());
        assert!(ErrorResponse::new(INVALID_TOKEN_MSG).is_token_failure());
        assert!(!ErrorResponse::new("User not authorized").is_token_failure());
        assert!(!ErrorResponse::server_error().is_token_failure());
    }
}
