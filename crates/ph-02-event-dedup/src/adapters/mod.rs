//! # Store Adapters
//!
//! - `memory`: `DashMap`-backed store for single-process deployments and tests
//! - `rocksdb`: persistent store (feature `rocksdb`)

pub mod memory;

#[cfg(feature = "rocksdb")]
pub mod rocksdb;
