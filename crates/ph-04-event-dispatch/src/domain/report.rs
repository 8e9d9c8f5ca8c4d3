//! # Dispatch Report
//!
//! Outcome of routing one event, returned to the gateway and serialized into
//! the webhook response.

use crate::domain::errors::DispatchHandlerError;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use shared_types::EventId;

/// Result of one handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOutcome {
    pub handler_name: String,
    /// Pattern the handler was subscribed under.
    pub pattern: String,
    pub outcome: Result<(), DispatchHandlerError>,
    pub elapsed_ms: u64,
}

impl HandlerOutcome {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Per-event dispatch summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub event_id: EventId,
    pub event_type: String,
    pub matched_count: usize,
    pub per_handler: Vec<HandlerOutcome>,
}

impl DispatchReport {
    /// Handlers that failed or timed out, in invocation order.
    pub fn failures(&self) -> impl Iterator<Item = &HandlerOutcome> {
        self.per_handler.iter().filter(|h| !h.is_ok())
    }

    pub fn all_succeeded(&self) -> bool {
        self.per_handler.iter().all(HandlerOutcome::is_ok)
    }
}

/// Serialized flat: `{"handler_name", "pattern", "status", ["reason" | "timeout_ms"], "elapsed_ms"}`.
impl Serialize for HandlerOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("handler_name", &self.handler_name)?;
        map.serialize_entry("pattern", &self.pattern)?;
        match &self.outcome {
            Ok(()) => map.serialize_entry("status", "ok")?,
            Err(DispatchHandlerError::HandlerFailed { reason }) => {
                map.serialize_entry("status", "failed")?;
                map.serialize_entry("reason", reason)?;
            }
            Err(DispatchHandlerError::HandlerTimeout { timeout_ms }) => {
                map.serialize_entry("status", "timeout")?;
                map.serialize_entry("timeout_ms", timeout_ms)?;
            }
        }
        map.serialize_entry("elapsed_ms", &self.elapsed_ms)?;
        map.end()
    }
}
