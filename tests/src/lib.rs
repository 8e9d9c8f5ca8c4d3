//! # Payhook Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs      # Hub assembly, signed requests, counting handlers
//! ├── integration/     # Full webhook and metadata flows across crates
//! └── adversarial/     # Replay, forgery and retry-storm deliveries
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ph-tests
//! cargo test -p ph-tests integration::
//! cargo test -p ph-tests adversarial::
//!
//! # Benchmarks
//! cargo bench -p ph-tests
//! ```

pub mod adversarial;
pub mod fixtures;
pub mod integration;
