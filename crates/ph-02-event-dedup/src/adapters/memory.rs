//! In-memory dedup store.

use crate::domain::entities::DedupRecord;
use crate::domain::errors::DedupError;
use crate::ports::outbound::DedupStore;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_types::{EventId, Timestamp};
use std::sync::atomic::{AtomicBool, Ordering};

/// `DashMap`-backed store.
///
/// The entry API holds the shard lock across check and insert, which gives
/// the atomic upsert the port requires.
#[derive(Debug, Default)]
pub struct InMemoryDedupStore {
    records: DashMap<EventId, Timestamp>,
    outage: AtomicBool,
}

impl InMemoryDedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every operation fail with `StoreUnavailable` while `true`.
    pub fn simulate_outage(&self, down: bool) {
        self.outage.store(down, Ordering::SeqCst);
    }

    /// Check if an identifier is held.
    pub fn contains(&self, event_id: &str) -> bool {
        self.records.contains_key(event_id)
    }

    /// Number of identifiers held, ignoring simulated outages.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn ensure_available(&self) -> Result<(), DedupError> {
        if self.outage.load(Ordering::SeqCst) {
            return Err(DedupError::StoreUnavailable(
                "in-memory store marked unavailable".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DedupStore for InMemoryDedupStore {
    async fn insert_if_absent(&self, record: DedupRecord) -> Result<bool, DedupError> {
        self.ensure_available()?;
        match self.records.entry(record.event_id) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(record.processed_at);
                Ok(true)
            }
        }
    }

    async fn remove(&self, event_id: &str) -> Result<bool, DedupError> {
        self.ensure_available()?;
        Ok(self.records.remove(event_id).is_some())
    }

    async fn purge_older_than(&self, cutoff: Timestamp) -> Result<usize, DedupError> {
        self.ensure_available()?;
        let before = self.records.len();
        self.records.retain(|_, processed_at| *processed_at >= cutoff);
        Ok(before.saturating_sub(self.records.len()))
    }

    async fn len(&self) -> Result<usize, DedupError> {
        self.ensure_available()?;
        Ok(self.records.len())
    }
}
