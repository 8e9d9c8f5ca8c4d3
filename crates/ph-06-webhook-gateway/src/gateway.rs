//! # Webhook Pipeline
//!
//! verify -> claim -> dispatch, independent of the HTTP framework.

use crate::domain::config::{DedupUnavailablePolicy, DuplicateResponse};
use crate::domain::error::GatewayError;
use crate::domain::outcome::WebhookOutcome;
use axum::http::{HeaderName, StatusCode};
use ph_01_signature_verification::{VerificationError, WebhookVerifier};
use ph_02_event_dedup::EventDeduplicator;
use ph_04_event_dispatch::{DispatchReport, EventDispatcher};
use shared_types::Event;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared by every request of the server.
pub struct WebhookGateway {
    verifier: Arc<dyn WebhookVerifier>,
    dedup: Arc<EventDeduplicator>,
    dispatcher: Arc<EventDispatcher>,
    signature_header: HeaderName,
    on_dedup_unavailable: DedupUnavailablePolicy,
    duplicate_response: DuplicateResponse,
}

impl WebhookGateway {
    pub fn new(
        verifier: Arc<dyn WebhookVerifier>,
        dedup: Arc<EventDeduplicator>,
        dispatcher: Arc<EventDispatcher>,
        signature_header: HeaderName,
    ) -> Self {
        Self {
            verifier,
            dedup,
            dispatcher,
            signature_header,
            on_dedup_unavailable: DedupUnavailablePolicy::default(),
            duplicate_response: DuplicateResponse::default(),
        }
    }

    pub fn with_dedup_unavailable_policy(mut self, policy: DedupUnavailablePolicy) -> Self {
        self.on_dedup_unavailable = policy;
        self
    }

    pub fn with_duplicate_response(mut self, response: DuplicateResponse) -> Self {
        self.duplicate_response = response;
        self
    }

    pub fn signature_header(&self) -> &HeaderName {
        &self.signature_header
    }

    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }

    pub fn dedup(&self) -> &Arc<EventDeduplicator> {
        &self.dedup
    }

    /// Runs one webhook delivery through the pipeline.
    ///
    /// # Errors
    ///
    /// - `GatewayError::Verification` for any authentication failure
    /// - `GatewayError::DedupUnavailable` when the store is down and the
    ///   policy is `Reject`
    /// - `GatewayError::DispatchAborted` when the dispatch task dies; the
    ///   claim is released first
    pub async fn handle(
        &self,
        raw_body: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookOutcome, GatewayError> {
        let signature = signature.ok_or_else(|| {
            VerificationError::MalformedSignature(format!(
                "missing {} header",
                self.signature_header
            ))
        })?;

        let event = self.verifier.verify(raw_body, signature)?;
        let event_id = event.id().to_string();

        match self.dedup.claim(&event_id).await {
            Ok(true) => match self.dispatch_detached(event).await {
                Ok(report) => Ok(WebhookOutcome::Processed { event_id, report }),
                Err(e) => {
                    self.release_claim(&event_id).await;
                    Err(e)
                }
            },
            Ok(false) => {
                debug!(event_id = %event_id, "Skipping dispatch of duplicate");
                Ok(WebhookOutcome::Duplicate { event_id })
            }
            Err(e) => match self.on_dedup_unavailable {
                DedupUnavailablePolicy::Reject => Err(GatewayError::DedupUnavailable(e)),
                DedupUnavailablePolicy::ProcessWithoutDedup => {
                    warn!(event_id = %event_id, error = %e, "Dispatching without dedup");
                    let report = self.dispatch_detached(event).await?;
                    Ok(WebhookOutcome::ProcessedWithoutDedup { event_id, report })
                }
            },
        }
    }

    /// Hands the identifier back so the provider's retry is dispatched rather
    /// than reported as a duplicate.
    async fn release_claim(&self, event_id: &str) {
        if let Err(e) = self.dedup.release(event_id).await {
            warn!(event_id, error = %e, "Could not release claim of aborted dispatch");
        }
    }

    /// HTTP status for a successful outcome.
    pub fn status_for(&self, outcome: &WebhookOutcome) -> StatusCode {
        match (outcome, self.duplicate_response) {
            (WebhookOutcome::Duplicate { .. }, DuplicateResponse::Conflict) => StatusCode::CONFLICT,
            _ => StatusCode::OK,
        }
    }

    /// Dispatches on its own task so that dropping the request future (client
    /// disconnect) does not cancel handlers mid-flight.
    async fn dispatch_detached(&self, event: Event) -> Result<DispatchReport, GatewayError> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let task = tokio::spawn(async move { dispatcher.dispatch(&event).await });

        let report = task
            .await
            .map_err(|e| GatewayError::DispatchAborted(e.to_string()))?;
        info!(
            event_id = %report.event_id,
            matched = report.matched_count,
            all_succeeded = report.all_succeeded(),
            "Webhook processed"
        );
        Ok(report)
    }
}
