//! # Event Deduplicator Service
//!
//! Stamps claims with the current time, triggers lazy eviction, and
//! delegates the atomic check-and-insert to the store.

use crate::domain::entities::{DedupConfig, DedupRecord};
use crate::domain::errors::DedupError;
use crate::ports::outbound::DedupStore;
use shared_types::{SystemTimeSource, TimeSource};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Deduplicator shared by all concurrent webhook requests.
pub struct EventDeduplicator {
    store: Arc<dyn DedupStore>,
    config: DedupConfig,
    time_source: Arc<dyn TimeSource>,
    /// Timestamp of the last lazy purge.
    last_gc: AtomicU64,
}

impl EventDeduplicator {
    pub fn new(store: Arc<dyn DedupStore>, config: DedupConfig) -> Self {
        Self::with_time_source(store, config, Arc::new(SystemTimeSource))
    }

    pub fn with_time_source(
        store: Arc<dyn DedupStore>,
        config: DedupConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        let now = time_source.now();
        Self {
            store,
            config,
            time_source,
            last_gc: AtomicU64::new(now),
        }
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// Claims an event identifier.
    ///
    /// Returns `Ok(true)` if this is the first sighting (proceed), `Ok(false)`
    /// for a duplicate (skip).
    ///
    /// # Errors
    ///
    /// `DedupError::StoreUnavailable` when the store cannot answer. The event
    /// is NOT treated as new in that case.
    pub async fn claim(&self, event_id: &str) -> Result<bool, DedupError> {
        let now = self.time_source.now();
        self.maybe_purge(now).await;

        let record = DedupRecord::new(event_id, now);
        match self.store.insert_if_absent(record).await {
            Ok(true) => {
                debug!(event_id, "Event claimed");
                Ok(true)
            }
            Ok(false) => {
                info!(event_id, "Duplicate event delivery");
                Ok(false)
            }
            Err(e) => {
                error!(event_id, error = %e, "Dedup store unavailable, claim failed closed");
                Err(e)
            }
        }
    }

    /// Gives up a claim so the next delivery of `event_id` is treated as new.
    ///
    /// Used when a claimed event could not be dispatched.
    pub async fn release(&self, event_id: &str) -> Result<bool, DedupError> {
        let released = self.store.remove(event_id).await?;
        if released {
            info!(event_id, "Event claim released");
        }
        Ok(released)
    }

    /// Evicts records older than the retention window.
    pub async fn purge_expired(&self) -> Result<usize, DedupError> {
        let now = self.time_source.now();
        let cutoff = now.saturating_sub(self.config.retention_secs);
        let removed = self.store.purge_older_than(cutoff).await?;
        self.last_gc.store(now, Ordering::Relaxed);
        Ok(removed)
    }

    /// Number of identifiers currently remembered.
    pub async fn tracked(&self) -> Result<usize, DedupError> {
        self.store.len().await
    }

    /// Purges on the write path once the GC interval has elapsed. Only the
    /// caller that wins the compare-exchange performs the purge.
    async fn maybe_purge(&self, now: u64) {
        let last = self.last_gc.load(Ordering::Relaxed);
        if now.saturating_sub(last) <= self.config.gc_interval_secs {
            return;
        }
        if self
            .last_gc
            .compare_exchange(last, now, Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
        {
            return;
        }

        let cutoff = now.saturating_sub(self.config.retention_secs);
        match self.store.purge_older_than(cutoff).await {
            Ok(removed) if removed > 0 => debug!(removed, "Evicted expired dedup records"),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Lazy dedup purge failed"),
        }
    }
}

/// Periodic eviction loop. Runs until the task is aborted.
pub async fn sweep_task(dedup: Arc<EventDeduplicator>, interval: Duration) {
    let mut sweep_interval = tokio::time::interval(interval);
    sweep_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        sweep_interval.tick().await;
        match dedup.purge_expired().await {
            Ok(removed) if removed > 0 => debug!(removed, "Swept expired dedup records"),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Dedup sweep failed"),
        }
    }
}
