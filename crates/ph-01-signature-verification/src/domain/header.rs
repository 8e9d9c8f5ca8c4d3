//! Parsing of the signature header.
//!
//! ```text
//! t=timestamp,v1=signature[,v1=signature...]
//! ```

use crate::domain::errors::VerificationError;
use shared_types::Timestamp;

/// Signature scheme accepted by the verifier.
pub const SCHEME_V1: &str = "v1";

/// A parsed signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: Timestamp,
    /// All `v1` signatures, in header order.
    pub signatures: Vec<String>,
}

/// Parses a signature header.
///
/// Elements with other schemes (e.g. `v0`) are ignored.
///
/// # Errors
///
/// `MalformedSignature` when an element is not `key=value`, the timestamp is
/// missing, repeated or not an integer, or no `v1` signature is present.
pub fn parse_signature_header(header: &str) -> Result<SignatureHeader, VerificationError> {
    let mut timestamp: Option<Timestamp> = None;
    let mut signatures = Vec::new();

    for element in header.split(',') {
        let element = element.trim();
        let Some((key, value)) = element.split_once('=') else {
            return Err(VerificationError::MalformedSignature(format!(
                "element '{element}' is not a key=value pair"
            )));
        };

        match key {
            "t" => {
                if timestamp.is_some() {
                    return Err(VerificationError::MalformedSignature(
                        "timestamp given more than once".into(),
                    ));
                }
                let parsed = value.parse::<Timestamp>().map_err(|_| {
                    VerificationError::MalformedSignature(format!("invalid timestamp '{value}'"))
                })?;
                timestamp = Some(parsed);
            }
            SCHEME_V1 => signatures.push(value.to_string()),
            _ => {}
        }
    }

    let Some(timestamp) = timestamp else {
        return Err(VerificationError::MalformedSignature(
            "missing timestamp".into(),
        ));
    };

    if signatures.is_empty() {
        return Err(VerificationError::MalformedSignature(
            "no v1 signature".into(),
        ));
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}
