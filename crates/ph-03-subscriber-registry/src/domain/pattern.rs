//! Event-type patterns and object-type selectors.

use crate::domain::errors::RegistryError;
use std::fmt;

const WILDCARD: &str = "*";

/// Matches event types of the dotted taxonomy.
///
/// - `*` matches every event
/// - `invoice.*` matches every type starting with `invoice.`
/// - anything else matches exactly
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventPattern {
    Any,
    /// Stored with the trailing dot, e.g. `invoice.`.
    Prefix(String),
    Exact(String),
}

impl EventPattern {
    pub fn parse(pattern: &str) -> Result<Self, RegistryError> {
        let pattern = pattern.trim();
        if pattern == WILDCARD {
            return Ok(Self::Any);
        }

        if let Some(stem) = pattern.strip_suffix(".*") {
            if stem.is_empty() || stem.contains('*') {
                return Err(RegistryError::InvalidPattern(pattern.to_string()));
            }
            return Ok(Self::Prefix(format!("{stem}.")));
        }

        if pattern.is_empty() || pattern.contains('*') {
            return Err(RegistryError::InvalidPattern(pattern.to_string()));
        }
        Ok(Self::Exact(pattern.to_string()))
    }

    pub fn matches(&self, event_type: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Prefix(prefix) => event_type.starts_with(prefix.as_str()),
            Self::Exact(exact) => exact == event_type,
        }
    }
}

impl fmt::Display for EventPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(WILDCARD),
            Self::Prefix(prefix) => write!(f, "{prefix}*"),
            Self::Exact(exact) => f.write_str(exact),
        }
    }
}

/// Selects which object types a metadata provider contributes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectTypeSelector {
    Any,
    Exact(String),
}

impl ObjectTypeSelector {
    pub fn parse(object_type: &str) -> Result<Self, RegistryError> {
        let object_type = object_type.trim();
        if object_type == WILDCARD {
            return Ok(Self::Any);
        }
        if object_type.is_empty() || object_type.contains('*') {
            return Err(RegistryError::InvalidPattern(object_type.to_string()));
        }
        Ok(Self::Exact(object_type.to_string()))
    }

    pub fn matches(&self, object_type: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(exact) => exact == object_type,
        }
    }
}

impl fmt::Display for ObjectTypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(WILDCARD),
            Self::Exact(exact) => f.write_str(exact),
        }
    }
}
