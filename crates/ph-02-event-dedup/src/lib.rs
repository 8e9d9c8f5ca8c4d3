//! # Event Deduplication (PH-02)
//!
//! Guarantees at-most-once side effects when the payment provider retries a
//! webhook delivery.
//!
//! ## Contract
//!
//! `claim(event_id)` returns `Ok(true)` the first time an identifier is
//! seen and `Ok(false)` afterwards. The check-and-insert is a single atomic
//! store operation, so concurrent deliveries of the same event yield
//! exactly one `true`.
//!
//! ## Failure Policy
//!
//! If the backing store cannot be reached, `claim` fails closed with
//! `DedupError::StoreUnavailable`. The caller decides whether to reject the
//! event (provider retries later) or process it without deduplication.
//!
//! ## Retention
//!
//! Records older than the retention window (default 14 days) are purged
//! lazily during `claim` once the GC interval has elapsed, and by the
//! periodic `sweep_task`.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::memory::InMemoryDedupStore;
#[cfg(feature = "rocksdb")]
pub use adapters::rocksdb::RocksDbDedupStore;
pub use domain::entities::{DedupConfig, DedupRecord};
pub use domain::errors::DedupError;
pub use ports::outbound::DedupStore;
pub use service::{sweep_task, EventDeduplicator};
