//! Adapters turning plain closures into extension capabilities.

pub mod closures;
