//! The verification pipeline: parse header, check staleness, check
//! signature, parse the event.

use crate::domain::errors::VerificationError;
use crate::domain::header::parse_signature_header;
use crate::domain::signature::SecretRing;
use shared_types::{Event, SystemTimeSource, TimeSource, Timestamp};

/// Default timestamp tolerance (5 minutes).
pub const DEFAULT_TOLERANCE_SECONDS: u64 = 300;

/// Verifies a request against a single secret using the system clock.
pub fn verify(
    raw_body: &[u8],
    signature_header: &str,
    secret: &str,
    tolerance_seconds: u64,
) -> Result<Event, VerificationError> {
    verify_at(
        raw_body,
        signature_header,
        secret,
        tolerance_seconds,
        SystemTimeSource.now(),
    )
}

/// Verifies a request against a single secret at an explicit `now`.
pub fn verify_at(
    raw_body: &[u8],
    signature_header: &str,
    secret: &str,
    tolerance_seconds: u64,
    now: Timestamp,
) -> Result<Event, VerificationError> {
    verify_with_secrets(
        raw_body,
        signature_header,
        &SecretRing::new(secret),
        tolerance_seconds,
        now,
    )
}

/// Verifies a request against every secret in `secrets`.
///
/// # Errors
///
/// - `MalformedSignature` - header cannot be parsed
/// - `StaleSignature` - `|now - t| > tolerance_seconds`
/// - `SignatureMismatch` - no `v1` entry matches
/// - `InvalidPayload` - authentic body is not an event document
pub fn verify_with_secrets(
    raw_body: &[u8],
    signature_header: &str,
    secrets: &SecretRing,
    tolerance_seconds: u64,
    now: Timestamp,
) -> Result<Event, VerificationError> {
    let header = parse_signature_header(signature_header)?;

    if now.abs_diff(header.timestamp) > tolerance_seconds {
        return Err(VerificationError::StaleSignature {
            timestamp: header.timestamp,
            now,
            tolerance_seconds,
        });
    }

    if !secrets.matches(raw_body, header.timestamp, &header.signatures) {
        return Err(VerificationError::SignatureMismatch);
    }

    Event::from_slice(raw_body, now).map_err(|e| VerificationError::InvalidPayload(e.to_string()))
}
