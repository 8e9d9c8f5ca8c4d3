//! # RocksDB Dedup Store
//!
//! Persistent store so retried deliveries are still recognized after a
//! restart.
//!
//! Keys are raw event identifiers; values are bincode-encoded
//! `DedupRecord`s. Check-and-put is serialized by a process-local mutex,
//! which is sufficient because one process owns the database directory.
//! Every RocksDB call runs on the blocking pool.

use crate::domain::entities::DedupRecord;
use crate::domain::errors::DedupError;
use crate::ports::outbound::DedupStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use rocksdb::{IteratorMode, Options, WriteBatch, DB};
use shared_types::Timestamp;
use std::path::Path;
use std::sync::Arc;

/// RocksDB-backed dedup store.
pub struct RocksDbDedupStore {
    inner: Arc<Inner>,
}

struct Inner {
    db: DB,
    write_lock: Mutex<()>,
}

impl RocksDbDedupStore {
    /// Open or create the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DedupError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path).map_err(unavailable)?;
        Ok(Self {
            inner: Arc::new(Inner {
                db,
                write_lock: Mutex::new(()),
            }),
        })
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, DedupError>
    where
        T: Send + 'static,
        F: FnOnce(&Inner) -> Result<T, DedupError> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || op(&inner))
            .await
            .map_err(unavailable)?
    }
}

impl Inner {
    fn insert_if_absent(&self, record: &DedupRecord) -> Result<bool, DedupError> {
        let _guard = self.write_lock.lock();

        let key = record.event_id.as_bytes();
        if self.db.get_pinned(key).map_err(unavailable)?.is_some() {
            return Ok(false);
        }

        let value = bincode::serialize(record).map_err(unavailable)?;
        self.db.put(key, value).map_err(unavailable)?;
        Ok(true)
    }

    fn remove(&self, event_id: &str) -> Result<bool, DedupError> {
        let _guard = self.write_lock.lock();

        let key = event_id.as_bytes();
        if self.db.get_pinned(key).map_err(unavailable)?.is_none() {
            return Ok(false);
        }
        self.db.delete(key).map_err(unavailable)?;
        Ok(true)
    }

    /// Scans without the write lock, then deletes under it. Candidates are
    /// re-read so a record re-claimed during the scan is kept.
    fn purge_older_than(&self, cutoff: Timestamp) -> Result<usize, DedupError> {
        let mut expired = Vec::new();
        for item in self.db.iterator(IteratorMode::Start) {
            let (key, value) = item.map_err(unavailable)?;
            if decode(&value)?.processed_at < cutoff {
                expired.push(key);
            }
        }
        if expired.is_empty() {
            return Ok(0);
        }

        let _guard = self.write_lock.lock();
        let mut batch = WriteBatch::default();
        let mut removed = 0;
        for key in expired {
            let still_expired = match self.db.get_pinned(&*key).map_err(unavailable)? {
                Some(value) => decode(&value)?.processed_at < cutoff,
                None => false,
            };
            if still_expired {
                batch.delete(&*key);
                removed += 1;
            }
        }

        self.db.write(batch).map_err(unavailable)?;
        Ok(removed)
    }

    fn len(&self) -> Result<usize, DedupError> {
        let mut count = 0;
        for item in self.db.iterator(IteratorMode::Start) {
            item.map_err(unavailable)?;
            count += 1;
        }
        Ok(count)
    }
}

fn decode(value: &[u8]) -> Result<DedupRecord, DedupError> {
    bincode::deserialize(value).map_err(unavailable)
}

fn unavailable(e: impl std::fmt::Display) -> DedupError {
    DedupError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl DedupStore for RocksDbDedupStore {
    async fn insert_if_absent(&self, record: DedupRecord) -> Result<bool, DedupError> {
        self.blocking(move |inner| inner.insert_if_absent(&record)).await
    }

    async fn remove(&self, event_id: &str) -> Result<bool, DedupError> {
        let event_id = event_id.to_string();
        self.blocking(move |inner| inner.remove(&event_id)).await
    }

    async fn purge_older_than(&self, cutoff: Timestamp) -> Result<usize, DedupError> {
        self.blocking(move |inner| inner.purge_older_than(cutoff)).await
    }

    async fn len(&self) -> Result<usize, DedupError> {
        self.blocking(|inner| inner.len()).await
    }
}
