//! Gateway error types and their HTTP mapping.

use crate::domain::config::ConfigError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ph_01_signature_verification::VerificationError;
use ph_02_event_dedup::DedupError;
use ph_03_subscriber_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request failed authentication or carried an invalid document.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// Dedup store down and the policy is to reject.
    #[error(transparent)]
    DedupUnavailable(#[from] DedupError),

    /// The dispatch task ended without producing a report.
    #[error("dispatch aborted: {0}")]
    DispatchAborted(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("server error: {0}")]
    Server(String),

    #[error("telemetry init failed: {0}")]
    Telemetry(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Verification(_) => StatusCode::BAD_REQUEST,
            Self::DedupUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Verification(VerificationError::MalformedSignature(_)) => "malformed_signature",
            Self::Verification(VerificationError::StaleSignature { .. }) => "stale_signature",
            Self::Verification(VerificationError::SignatureMismatch) => "signature_mismatch",
            Self::Verification(VerificationError::InvalidPayload(_)) => "invalid_payload",
            Self::DedupUnavailable(_) => "dedup_unavailable",
            Self::DispatchAborted(_) => "dispatch_aborted",
            Self::Config(_) => "config",
            Self::Registry(_) => "registry",
            Self::Bind { .. } | Self::Server(_) => "server",
            Self::Telemetry(_) => "telemetry",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "status": "error",
            "error": self.kind(),
            "message": self.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}
