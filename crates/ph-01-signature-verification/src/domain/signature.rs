//! HMAC-SHA256 signing over `"<t>.<body>"`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use shared_types::Timestamp;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex-encoded `v1` signature for a body at timestamp `t`.
pub fn sign_payload(body: &[u8], secret: &[u8], timestamp: Timestamp) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Builds a complete `t=...,v1=...` header for a body.
pub fn signature_header(body: &[u8], secret: &[u8], timestamp: Timestamp) -> String {
    format!("t={},v1={}", timestamp, sign_payload(body, secret, timestamp))
}

/// Set of secrets accepted for one endpoint.
///
/// The first secret is the current one; the rest are kept while a rotation
/// is in progress.
#[derive(Clone, Default)]
pub struct SecretRing {
    secrets: Vec<Vec<u8>>,
}

impl SecretRing {
    pub fn new(current: impl AsRef<[u8]>) -> Self {
        Self {
            secrets: vec![current.as_ref().to_vec()],
        }
    }

    /// Adds a previous secret still accepted during rotation.
    pub fn with_previous(mut self, secret: impl AsRef<[u8]>) -> Self {
        self.secrets.push(secret.as_ref().to_vec());
        self
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// True if any provided signature matches any secret.
    pub fn matches(&self, body: &[u8], timestamp: Timestamp, provided: &[String]) -> bool {
        self.secrets.iter().any(|secret| {
            let expected = sign_payload(body, secret, timestamp);
            provided
                .iter()
                .any(|candidate| bool::from(expected.as_bytes().ct_eq(candidate.as_bytes())))
        })
    }
}

impl std::fmt::Debug for SecretRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretRing")
            .field("secrets", &format_args!("<{} redacted>", self.secrets.len()))
            .finish()
    }
}
