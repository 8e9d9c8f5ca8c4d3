//! # Core Domain Entities
//!
//! The payment-provider event as seen by the hub after verification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Provider-assigned event identifier (e.g. `evt_1Nq...`).
pub type EventId = String;

/// A verified payment-provider event.
///
/// Constructed only after the signature check succeeded, then never mutated.
/// `event_type` follows the provider's dotted taxonomy
/// (`invoice.payment_succeeded`, `charge.refunded`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    id: EventId,
    #[serde(rename = "type")]
    event_type: String,
    payload: Value,
    created: Option<Timestamp>,
    livemode: Option<bool>,
    received_at: Timestamp,
}

/// Wire shape of an inbound event document.
#[derive(Deserialize)]
struct WireEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    created: Option<Timestamp>,
    #[serde(default)]
    livemode: Option<bool>,
}

/// Reasons an event document cannot be turned into an `Event`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventParseError {
    /// Body is not a JSON event document.
    #[error("Invalid event document: {0}")]
    Json(String),

    /// A required field is present but empty.
    #[error("Event field '{0}' must not be empty")]
    EmptyField(&'static str),
}

impl Event {
    /// Build an event directly (used by tests and in-process producers).
    pub fn new(
        id: impl Into<EventId>,
        event_type: impl Into<String>,
        payload: Value,
        received_at: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            event_type: event_type.into(),
            payload,
            created: None,
            livemode: None,
            received_at,
        }
    }

    /// Parse a raw event document `{id, type, data, ...}`.
    pub fn from_slice(body: &[u8], received_at: Timestamp) -> Result<Self, EventParseError> {
        let wire: WireEvent =
            serde_json::from_slice(body).map_err(|e| EventParseError::Json(e.to_string()))?;

        if wire.id.is_empty() {
            return Err(EventParseError::EmptyField("id"));
        }
        if wire.event_type.is_empty() {
            return Err(EventParseError::EmptyField("type"));
        }

        Ok(Self {
            id: wire.id,
            event_type: wire.event_type,
            payload: wire.data,
            created: wire.created,
            livemode: wire.livemode,
            received_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The `data` document of the event.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Provider-side creation time, when supplied.
    pub fn created(&self) -> Option<Timestamp> {
        self.created
    }

    pub fn livemode(&self) -> Option<bool> {
        self.livemode
    }

    /// When the hub accepted the request.
    pub fn received_at(&self) -> Timestamp {
        self.received_at
    }
}
