//! Successful webhook outcomes.

use ph_04_event_dispatch::DispatchReport;
use serde::Serialize;
use shared_types::EventId;

/// What the gateway did with an authentic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WebhookOutcome {
    /// First delivery, dispatched.
    Processed {
        event_id: EventId,
        report: DispatchReport,
    },
    /// Already claimed; handlers were not invoked.
    Duplicate { event_id: EventId },
    /// Dedup store unreachable and the policy allowed dispatching anyway.
    ProcessedWithoutDedup {
        event_id: EventId,
        report: DispatchReport,
    },
}

impl WebhookOutcome {
    pub fn event_id(&self) -> &str {
        match self {
            Self::Processed { event_id, .. }
            | Self::Duplicate { event_id }
            | Self::ProcessedWithoutDedup { event_id, .. } => event_id,
        }
    }

    pub fn report(&self) -> Option<&DispatchReport> {
        match self {
            Self::Processed { report, .. } | Self::ProcessedWithoutDedup { report, .. } => {
                Some(report)
            }
            Self::Duplicate { .. } => None,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}
