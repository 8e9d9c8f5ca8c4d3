//! # Signature Verification (PH-01)
//!
//! Authenticates inbound webhook requests before anything else touches them.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): header parsing, HMAC computation, the
//!   pure `verify_at` check. No I/O, time passed in explicitly.
//! - **Ports Layer** (`ports/`): the `WebhookVerifier` trait consumed by the
//!   gateway.
//! - **Service Layer** (`service.rs`): `SignatureVerifier`, which binds the
//!   secrets, tolerance and a `TimeSource`.
//!
//! ## Signature Scheme
//!
//! ```text
//! Stripe-Signature: t=1700000000,v1=<hex hmac>[,v1=<hex hmac>...]
//! signed payload  = "<t>.<raw body>"
//! v1              = hex(HMAC-SHA256(secret, signed payload))
//! ```
//!
//! ## Security Notes
//!
//! - Signatures are compared in constant time.
//! - The timestamp is checked before the signature so stale requests are
//!   always reported as stale, even when correctly signed.
//! - Several `v1` entries and several secrets may be present during key
//!   rotation; any match is accepted.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::VerificationError;
pub use domain::header::{parse_signature_header, SignatureHeader};
pub use domain::signature::{signature_header, sign_payload, SecretRing};
pub use domain::verify::{verify, verify_at, verify_with_secrets, DEFAULT_TOLERANCE_SECONDS};
pub use ports::inbound::WebhookVerifier;
pub use service::SignatureVerifier;
