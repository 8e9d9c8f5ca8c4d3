//! Deduplication domain types.

pub mod entities;
pub mod errors;
