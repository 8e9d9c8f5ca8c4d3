//! Dedup records and configuration.

use serde::{Deserialize, Serialize};
use shared_types::{EventId, Timestamp};

const SECS_PER_DAY: u64 = 86_400;

/// Marks an event identifier as processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupRecord {
    pub event_id: EventId,
    pub processed_at: Timestamp,
}

impl DedupRecord {
    pub fn new(event_id: impl Into<EventId>, processed_at: Timestamp) -> Self {
        Self {
            event_id: event_id.into(),
            processed_at,
        }
    }
}

/// Deduplicator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupConfig {
    /// How long identifiers are remembered (default: 14 days, the provider's
    /// maximum retry window).
    pub retention_secs: u64,
    /// Minimum spacing between lazy purges triggered from `claim`.
    pub gc_interval_secs: u64,
}

impl DedupConfig {
    pub const DEFAULT_RETENTION_DAYS: u64 = 14;
    pub const DEFAULT_GC_INTERVAL: u64 = 3_600;

    pub fn with_retention_days(days: u64) -> Self {
        Self {
            retention_secs: days.saturating_mul(SECS_PER_DAY),
            ..Self::default()
        }
    }
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            retention_secs: Self::DEFAULT_RETENTION_DAYS * SECS_PER_DAY,
            gc_interval_secs: Self::DEFAULT_GC_INTERVAL,
        }
    }
}
