//! # Dedup Errors

use thiserror::Error;

/// Errors from the deduplicator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DedupError {
    /// The backing store could not be reached. Claims fail closed.
    #[error("Dedup store unavailable: {0}")]
    StoreUnavailable(String),
}
