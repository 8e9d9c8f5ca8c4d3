//! # Subscriber Registry (PH-03)
//!
//! Maps event-type patterns to handlers and object types to metadata
//! providers.
//!
//! ## Lifecycle
//!
//! The registry is populated once during startup through `&mut self`
//! registration calls, then wrapped in an `Arc` and shared read-only by every
//! concurrent dispatch and aggregation. There is no global instance; each
//! service (and each test) owns its own.
//!
//! ## Ordering
//!
//! Lookups return entries in registration order. Handlers registered under
//! different patterns interleave by the order they were registered.
//!
//! ## Conflicts
//!
//! Registering the same `(pattern, handler name)` twice is a configuration
//! mistake and fails with `RegistryError::DuplicateRegistration`, unless
//! `OnConflict::Replace` is passed.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod registry;

pub use adapters::closures::{handler_fn, provider_fn, FnEventHandler, FnMetadataProvider};
pub use domain::errors::RegistryError;
pub use domain::pattern::{EventPattern, ObjectTypeSelector};
pub use ports::outbound::{EventHandler, MetadataProvider};
pub use registry::{OnConflict, ProviderRegistration, SubscriberRegistry, Subscription};
