//! Cross-crate flows through the public hub surface.

pub mod webhook_flow;
