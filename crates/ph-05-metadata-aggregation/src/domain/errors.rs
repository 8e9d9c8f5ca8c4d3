use thiserror::Error;

/// A provider could not contribute. Recorded, never propagated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregationProviderError {
    #[error("Metadata provider '{provider}' failed: {reason}")]
    ProviderFailed { provider: String, reason: String },
}
