//! # Verification Errors
//!
//! Every variant is terminal for the inbound request (HTTP 400).

use shared_types::Timestamp;
use thiserror::Error;

/// Errors that can occur while authenticating a webhook request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The signature header could not be parsed into `(t, v1...)`.
    #[error("Malformed signature header: {0}")]
    MalformedSignature(String),

    /// The header timestamp is outside the tolerance window.
    #[error("Stale signature: timestamp {timestamp} is more than {tolerance_seconds}s from now ({now})")]
    StaleSignature {
        timestamp: Timestamp,
        now: Timestamp,
        tolerance_seconds: u64,
    },

    /// None of the provided signatures matches the computed one.
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// The body was authentic but is not a valid event document.
    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),
}
