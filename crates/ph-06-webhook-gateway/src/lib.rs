//! # Webhook Gateway (PH-06)
//!
//! HTTP surface and composition root of the payment hub.
//!
//! ## Request Pipeline
//!
//! ```text
//! POST /webhook
//!   -> SignatureVerifier   (400 on any verification error)
//!   -> EventDeduplicator   (duplicate: 200 or 409; store down: 503 or bypass)
//!   -> EventDispatcher     (spawned, survives a dropped connection)
//!   -> 200 + DispatchReport
//! ```
//!
//! ## Composition
//!
//! `PaymentHub` wires the verifier, deduplicator, dispatcher and metadata
//! aggregator around one read-only `SubscriberRegistry`. It exposes the
//! axum `Router` for embedding and `aggregate()` as the synchronous metadata
//! extension point for outbound create/update calls.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod gateway;
pub mod hub;
pub mod router;
pub mod service;
pub mod telemetry;

pub use domain::config::{ConfigError, DedupUnavailablePolicy, DuplicateResponse, HubConfig};
pub use domain::error::GatewayError;
pub use domain::outcome::WebhookOutcome;
pub use gateway::WebhookGateway;
pub use hub::PaymentHub;
pub use router::build_router;
pub use service::WebhookGatewayService;
pub use telemetry::init_logging;
