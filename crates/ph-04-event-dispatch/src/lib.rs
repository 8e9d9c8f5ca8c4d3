//! # Event Dispatch (PH-04)
//!
//! Routes a verified event to every matching handler in the registry.
//!
//! ## Guarantees
//!
//! - Handlers run sequentially in registration order.
//! - Each handler is isolated: an error, a panic, or a timeout is recorded in
//!   the `DispatchReport` and the next handler still runs.
//! - `dispatch` itself never fails. The webhook is acknowledged regardless of
//!   individual handler outcomes, otherwise the provider would keep
//!   redelivering.
//! - No handler runs longer than the configured timeout. A timed-out handler
//!   future is dropped at its next await point.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod service;

pub use domain::errors::DispatchHandlerError;
pub use domain::report::{DispatchReport, HandlerOutcome};
pub use service::{EventDispatcher, DEFAULT_HANDLER_TIMEOUT};
