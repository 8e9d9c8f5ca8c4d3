//! # Shared Types Crate
//!
//! Entities and contracts shared by every hub component.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Event` is defined once and consumed by the
//!   verifier, deduplicator and dispatcher alike.
//! - **Immutable Events**: an `Event` exposes accessors only; once parsed from
//!   a verified body it cannot be altered.
//! - **Ordered Metadata**: attribute maps preserve insertion order so merged
//!   output is deterministic.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod entities;
pub mod errors;
pub mod metadata;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use metadata::*;
pub use time::*;
