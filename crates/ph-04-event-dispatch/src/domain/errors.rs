//! Per-handler failure outcomes.

use thiserror::Error;

/// Why a single handler invocation did not succeed.
///
/// These never abort a dispatch; they are collected into the report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchHandlerError {
    /// Handler returned an error or panicked.
    #[error("Handler failed: {reason}")]
    HandlerFailed { reason: String },

    /// Handler exceeded its time budget.
    #[error("Handler timed out after {timeout_ms}ms")]
    HandlerTimeout { timeout_ms: u64 },
}
