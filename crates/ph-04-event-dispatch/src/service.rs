//! # Event Dispatcher Service

use crate::domain::errors::DispatchHandlerError;
use crate::domain::report::{DispatchReport, HandlerOutcome};
use ph_03_subscriber_registry::{SubscriberRegistry, Subscription};
use shared_types::{panic_message, Event};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinError;
use tracing::{debug, info, warn};

/// Per-handler budget used when none is configured.
pub const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(10);

/// Routes events to the handlers of a shared, read-only registry.
///
/// Cheap to share behind an `Arc`; dispatches for different events may run
/// fully in parallel.
pub struct EventDispatcher {
    registry: Arc<SubscriberRegistry>,
    handler_timeout: Duration,
}

impl EventDispatcher {
    pub fn new(registry: Arc<SubscriberRegistry>, handler_timeout: Duration) -> Self {
        Self {
            registry,
            handler_timeout,
        }
    }

    pub fn handler_timeout(&self) -> Duration {
        self.handler_timeout
    }

    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    /// Invokes every matching handler, in registration order.
    pub async fn dispatch(&self, event: &Event) -> DispatchReport {
        let subscriptions = self.registry.lookup_event(event.event_type());
        let matched_count = subscriptions.len();

        if matched_count == 0 {
            debug!(event_id = event.id(), event_type = event.event_type(), "No handlers matched");
        }

        let mut per_handler = Vec::with_capacity(matched_count);
        for subscription in subscriptions {
            per_handler.push(self.invoke(subscription, event).await);
        }

        let report = DispatchReport {
            event_id: event.id().to_string(),
            event_type: event.event_type().to_string(),
            matched_count,
            per_handler,
        };

        info!(
            event_id = event.id(),
            event_type = event.event_type(),
            matched = report.matched_count,
            failed = report.failures().count(),
            "Event dispatched"
        );
        report
    }

    /// Runs one handler on its own task.
    ///
    /// The timeout is enforced on the task handle, so a handler that blocks
    /// its thread still yields `HandlerTimeout` on time. An expired task is
    /// aborted and its result discarded.
    async fn invoke(&self, subscription: &Subscription, event: &Event) -> HandlerOutcome {
        let handler_name = subscription.handler.name();
        let started = Instant::now();

        let handler = Arc::clone(&subscription.handler);
        let owned_event = event.clone();
        let mut task = tokio::spawn(async move { handler.handle(&owned_event).await });

        let outcome = match tokio::time::timeout(self.handler_timeout, &mut task).await {
            Ok(Ok(Ok(()))) => Ok(()),
            Ok(Ok(Err(e))) => Err(DispatchHandlerError::HandlerFailed {
                reason: e.to_string(),
            }),
            Ok(Err(join_error)) => Err(DispatchHandlerError::HandlerFailed {
                reason: join_failure(join_error),
            }),
            Err(_) => {
                task.abort();
                Err(DispatchHandlerError::HandlerTimeout {
                    timeout_ms: self.handler_timeout.as_millis() as u64,
                })
            }
        };

        if let Err(e) = &outcome {
            warn!(
                event_id = event.id(),
                handler = handler_name,
                error = %e,
                "Handler did not complete"
            );
        }

        HandlerOutcome {
            handler_name: handler_name.to_string(),
            pattern: subscription.pattern.to_string(),
            outcome,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

fn join_failure(join_error: JoinError) -> String {
    if join_error.is_panic() {
        let payload = join_error.into_panic();
        format!("handler panicked: {}", panic_message(payload.as_ref()))
    } else {
        format!("handler task cancelled: {join_error}")
    }
}
