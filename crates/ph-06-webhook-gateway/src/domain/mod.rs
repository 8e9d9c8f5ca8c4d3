//! Gateway domain: configuration, errors and webhook outcomes.

pub mod config;
pub mod error;
pub mod outcome;
