//! Registry domain types.

pub mod errors;
pub mod pattern;
