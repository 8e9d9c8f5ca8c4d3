//! # Registry Errors
//!
//! Raised only while the registry is being populated; callers are expected
//! to abort startup.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The same extension was registered twice under the same key.
    #[error("Duplicate {kind} registration: '{name}' already registered for '{key}'")]
    DuplicateRegistration {
        kind: &'static str,
        key: String,
        name: String,
    },

    /// The pattern or object type cannot be interpreted.
    #[error("Invalid pattern '{0}': expected '*', 'prefix.*' or an exact name")]
    InvalidPattern(String),
}
