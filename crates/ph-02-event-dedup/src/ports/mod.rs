//! Port definitions.

pub mod outbound;
