//! # Outbound Ports (Driven Ports / SPI)
//!
//! Storage the deduplicator depends on.

use crate::domain::entities::DedupRecord;
use crate::domain::errors::DedupError;
use async_trait::async_trait;
use shared_types::Timestamp;

/// Keyed store with atomic upsert semantics.
///
/// # Atomicity
///
/// `insert_if_absent` MUST check and insert as one operation. Two concurrent
/// calls for the same `event_id` must not both return `true`.
#[async_trait]
pub trait DedupStore: Send + Sync {
    /// Inserts the record unless its `event_id` is already present.
    ///
    /// Returns `true` if inserted, `false` if it was already there.
    async fn insert_if_absent(&self, record: DedupRecord) -> Result<bool, DedupError>;

    /// Forgets one identifier. Returns `true` if it was present.
    async fn remove(&self, event_id: &str) -> Result<bool, DedupError>;

    /// Removes records with `processed_at < cutoff`. Returns how many.
    async fn purge_older_than(&self, cutoff: Timestamp) -> Result<usize, DedupError>;

    /// Number of records currently held.
    async fn len(&self) -> Result<usize, DedupError>;
}
