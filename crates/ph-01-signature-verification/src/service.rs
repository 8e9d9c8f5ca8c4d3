//! # Signature Verification Service
//!
//! Binds the endpoint secrets, tolerance and clock to the pure domain check.

use crate::domain::errors::VerificationError;
use crate::domain::signature::SecretRing;
use crate::domain::verify::{verify_with_secrets, DEFAULT_TOLERANCE_SECONDS};
use crate::ports::inbound::WebhookVerifier;
use shared_types::{Event, SystemTimeSource, TimeSource};
use std::sync::Arc;
use tracing::{debug, warn};

/// Verifier for one webhook endpoint.
pub struct SignatureVerifier {
    secrets: SecretRing,
    tolerance_seconds: u64,
    time_source: Arc<dyn TimeSource>,
}

impl SignatureVerifier {
    /// Verifier with the default 300s tolerance and system clock.
    pub fn new(secrets: SecretRing) -> Self {
        Self {
            secrets,
            tolerance_seconds: DEFAULT_TOLERANCE_SECONDS,
            time_source: Arc::new(SystemTimeSource),
        }
    }

    pub fn with_tolerance(mut self, tolerance_seconds: u64) -> Self {
        self.tolerance_seconds = tolerance_seconds;
        self
    }

    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    pub fn tolerance_seconds(&self) -> u64 {
        self.tolerance_seconds
    }
}

impl WebhookVerifier for SignatureVerifier {
    fn verify(&self, raw_body: &[u8], signature_header: &str) -> Result<Event, VerificationError> {
        let now = self.time_source.now();
        match verify_with_secrets(
            raw_body,
            signature_header,
            &self.secrets,
            self.tolerance_seconds,
            now,
        ) {
            Ok(event) => {
                debug!(
                    event_id = event.id(),
                    event_type = event.event_type(),
                    "Webhook signature verified"
                );
                Ok(event)
            }
            Err(e) => {
                warn!(error = %e, body_len = raw_body.len(), "Webhook verification failed");
                Err(e)
            }
        }
    }
}
