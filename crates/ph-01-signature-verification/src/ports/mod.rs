//! Port definitions.

pub mod inbound;
