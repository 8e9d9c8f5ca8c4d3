//! Hub configuration with validation.
//!
//! Loaded from a TOML file, then overridden by `PAYHOOK_*` environment
//! variables, then validated.
//!
//! ```toml
//! webhook_secret = "whsec_..."
//! previous_webhook_secrets = ["whsec_old"]
//! signature_tolerance_seconds = 300
//! dedup_retention_days = 14
//! handler_timeout_ms = 10000
//! bind_addr = "0.0.0.0:8088"
//! on_dedup_unavailable = "reject"
//! duplicate_response = "ok"
//! ```

use ph_01_signature_verification::{SecretRing, DEFAULT_TOLERANCE_SECONDS};
use ph_02_event_dedup::DedupConfig;
use serde::Deserialize;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default per-handler timeout in milliseconds.
pub const DEFAULT_HANDLER_TIMEOUT_MS: u64 = 10_000;

/// Default maximum webhook body size.
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;

/// What to do with an event when the dedup store cannot be reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupUnavailablePolicy {
    /// Answer 503 so the provider retries later.
    #[default]
    Reject,
    /// Dispatch anyway, accepting a possible duplicate side effect.
    ProcessWithoutDedup,
}

/// Status used to acknowledge a duplicate delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateResponse {
    /// 200, treating the duplicate as already handled.
    #[default]
    Ok,
    /// 409 Conflict.
    Conflict,
}

/// Main hub configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Current webhook signing secret
    pub webhook_secret: String,
    /// Secrets still accepted during key rotation
    pub previous_webhook_secrets: Vec<String>,
    pub signature_tolerance_seconds: u64,
    /// Header carrying `t=..,v1=..`
    pub signature_header: String,
    pub dedup_retention_days: u64,
    pub dedup_sweep_interval_secs: u64,
    /// RocksDB directory for the persistent dedup store (`rocksdb` feature).
    /// In-memory when unset.
    pub dedup_store_path: Option<PathBuf>,
    pub on_dedup_unavailable: DedupUnavailablePolicy,
    pub duplicate_response: DuplicateResponse,
    pub handler_timeout_ms: u64,
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
    /// `EnvFilter` directive, e.g. `info` or `ph_04_event_dispatch=debug`
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            webhook_secret: String::new(),
            previous_webhook_secrets: Vec::new(),
            signature_tolerance_seconds: DEFAULT_TOLERANCE_SECONDS,
            signature_header: "Stripe-Signature".to_string(),
            dedup_retention_days: DedupConfig::DEFAULT_RETENTION_DAYS,
            dedup_sweep_interval_secs: DedupConfig::DEFAULT_GC_INTERVAL,
            dedup_store_path: None,
            on_dedup_unavailable: DedupUnavailablePolicy::default(),
            duplicate_response: DuplicateResponse::default(),
            handler_timeout_ms: DEFAULT_HANDLER_TIMEOUT_MS,
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8088)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl fmt::Debug for HubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubConfig")
            .field("webhook_secret", &"<redacted>")
            .field("previous_webhook_secrets", &self.previous_webhook_secrets.len())
            .field("signature_tolerance_seconds", &self.signature_tolerance_seconds)
            .field("signature_header", &self.signature_header)
            .field("dedup_retention_days", &self.dedup_retention_days)
            .field("dedup_sweep_interval_secs", &self.dedup_sweep_interval_secs)
            .field("dedup_store_path", &self.dedup_store_path)
            .field("on_dedup_unavailable", &self.on_dedup_unavailable)
            .field("duplicate_response", &self.duplicate_response)
            .field("handler_timeout_ms", &self.handler_timeout_ms)
            .field("bind_addr", &self.bind_addr)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("log_level", &self.log_level)
            .field("json_logs", &self.json_logs)
            .finish()
    }
}

impl HubConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Missing keys take defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Override from `PAYHOOK_*` environment variables.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("PAYHOOK_WEBHOOK_SECRET") {
            self.webhook_secret = secret;
        }
        if let Some(secrets) = lookup("PAYHOOK_PREVIOUS_WEBHOOK_SECRETS") {
            self.previous_webhook_secrets = secrets
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(value) = lookup("PAYHOOK_SIGNATURE_TOLERANCE_SECONDS") {
            self.signature_tolerance_seconds =
                parse_env("PAYHOOK_SIGNATURE_TOLERANCE_SECONDS", &value)?;
        }
        if let Some(value) = lookup("PAYHOOK_DEDUP_RETENTION_DAYS") {
            self.dedup_retention_days = parse_env("PAYHOOK_DEDUP_RETENTION_DAYS", &value)?;
        }
        if let Some(value) = lookup("PAYHOOK_HANDLER_TIMEOUT_MS") {
            self.handler_timeout_ms = parse_env("PAYHOOK_HANDLER_TIMEOUT_MS", &value)?;
        }
        if let Some(value) = lookup("PAYHOOK_BIND_ADDR") {
            self.bind_addr = parse_env("PAYHOOK_BIND_ADDR", &value)?;
        }
        if let Some(path) = lookup("PAYHOOK_DEDUP_STORE_PATH") {
            self.dedup_store_path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup("PAYHOOK_LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.webhook_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.previous_webhook_secrets.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid(
                "previous_webhook_secrets cannot contain empty entries".into(),
            ));
        }
        if self.handler_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(
                "handler_timeout_ms cannot be 0".into(),
            ));
        }
        if self.dedup_retention_days == 0 {
            return Err(ConfigError::InvalidLimit(
                "dedup_retention_days cannot be 0".into(),
            ));
        }
        if self.dedup_sweep_interval_secs == 0 {
            return Err(ConfigError::InvalidLimit(
                "dedup_sweep_interval_secs cannot be 0".into(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit("max_body_bytes cannot be 0".into()));
        }
        if axum::http::HeaderName::from_bytes(self.signature_header.as_bytes()).is_err() {
            return Err(ConfigError::Invalid(format!(
                "signature_header '{}' is not a valid header name",
                self.signature_header
            )));
        }
        Ok(())
    }

    /// Current secret followed by the rotation secrets.
    pub fn secret_ring(&self) -> SecretRing {
        self.previous_webhook_secrets
            .iter()
            .fold(SecretRing::new(&self.webhook_secret), |ring, secret| {
                ring.with_previous(secret)
            })
    }

    pub fn dedup_config(&self) -> DedupConfig {
        DedupConfig {
            gc_interval_secs: self.dedup_sweep_interval_secs,
            ..DedupConfig::with_retention_days(self.dedup_retention_days)
        }
    }

    pub fn handler_timeout(&self) -> Duration {
        Duration::from_millis(self.handler_timeout_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.dedup_sweep_interval_secs)
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {error}")]
    Io { path: String, error: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid value '{value}' for {var}")]
    InvalidEnv { var: &'static str, value: String },
    #[error("webhook_secret must be set")]
    MissingSecret,
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
