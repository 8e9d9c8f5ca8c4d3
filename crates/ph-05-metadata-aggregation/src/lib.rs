//! # Metadata Aggregation (PH-05)
//!
//! Collects attribute contributions from every provider registered for an
//! object type and merges them into one attribute map.
//!
//! ## Merge Policy
//!
//! Contributions apply in provider registration order:
//!
//! - scalar keys: last write wins
//! - nested maps: merged recursively, sibling keys from different providers
//!   coexist; only leaf collisions follow last-write-wins
//! - map vs scalar under one key: the later value replaces the earlier one
//!
//! Output keys keep the position where they were first seen.
//!
//! A provider that errors or panics is skipped with a warning. Aggregation
//! itself never fails.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod service;

pub use domain::contribution::{MergedMetadata, MetadataContribution, SkippedProvider};
pub use domain::errors::AggregationProviderError;
pub use domain::merge::{apply_contribution, deep_merge};
pub use service::{AggregationReport, MetadataAggregator};
