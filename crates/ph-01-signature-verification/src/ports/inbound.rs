//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::VerificationError;
use shared_types::Event;

/// Authenticates a raw webhook request and yields the verified event.
///
/// Implementations must be thread-safe; one verifier serves every
/// concurrent request.
pub trait WebhookVerifier: Send + Sync {
    fn verify(&self, raw_body: &[u8], signature_header: &str) -> Result<Event, VerificationError>;
}
