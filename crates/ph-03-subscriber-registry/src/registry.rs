//! # Subscriber Registry
//!
//! Ordered lists of handler subscriptions and provider registrations.
//! Lookups are linear scans; registries hold tens of entries, not thousands.

use crate::domain::errors::RegistryError;
use crate::domain::pattern::{EventPattern, ObjectTypeSelector};
use crate::ports::outbound::{EventHandler, MetadataProvider};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// What to do when a registration collides with an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnConflict {
    /// Fail with `RegistryError::DuplicateRegistration`.
    #[default]
    Reject,
    /// Swap the existing entry, keeping its original position.
    Replace,
}

/// A handler subscribed to an event-type pattern.
#[derive(Clone)]
pub struct Subscription {
    pub pattern: EventPattern,
    pub handler: Arc<dyn EventHandler>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("pattern", &self.pattern.to_string())
            .field("handler", &self.handler.name())
            .finish()
    }
}

/// A metadata provider registered for an object type (or all of them).
#[derive(Clone)]
pub struct ProviderRegistration {
    pub selector: ObjectTypeSelector,
    pub provider: Arc<dyn MetadataProvider>,
}

impl fmt::Debug for ProviderRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistration")
            .field("selector", &self.selector.to_string())
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Registry of extension points, populated at startup.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    subscriptions: Vec<Subscription>,
    providers: Vec<ProviderRegistration>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `handler` to events matching `pattern`.
    pub fn register_event_handler(
        &mut self,
        pattern: &str,
        handler: Arc<dyn EventHandler>,
    ) -> Result<(), RegistryError> {
        self.register_event_handler_with(pattern, handler, OnConflict::Reject)
    }

    pub fn register_event_handler_with(
        &mut self,
        pattern: &str,
        handler: Arc<dyn EventHandler>,
        on_conflict: OnConflict,
    ) -> Result<(), RegistryError> {
        let pattern = EventPattern::parse(pattern)?;
        let existing = self
            .subscriptions
            .iter()
            .position(|s| s.pattern == pattern && s.handler.name() == handler.name());

        match (existing, on_conflict) {
            (Some(_), OnConflict::Reject) => Err(RegistryError::DuplicateRegistration {
                kind: "event handler",
                key: pattern.to_string(),
                name: handler.name().to_string(),
            }),
            (Some(index), OnConflict::Replace) => {
                info!(pattern = %pattern, handler = handler.name(), "Replaced event handler");
                self.subscriptions[index].handler = handler;
                Ok(())
            }
            (None, _) => {
                debug!(pattern = %pattern, handler = handler.name(), "Registered event handler");
                self.subscriptions.push(Subscription { pattern, handler });
                Ok(())
            }
        }
    }

    /// Registers `provider` for `object_type` (`*` for every type).
    pub fn register_metadata_provider(
        &mut self,
        object_type: &str,
        provider: Arc<dyn MetadataProvider>,
    ) -> Result<(), RegistryError> {
        self.register_metadata_provider_with(object_type, provider, OnConflict::Reject)
    }

    pub fn register_metadata_provider_with(
        &mut self,
        object_type: &str,
        provider: Arc<dyn MetadataProvider>,
        on_conflict: OnConflict,
    ) -> Result<(), RegistryError> {
        let selector = ObjectTypeSelector::parse(object_type)?;
        let existing = self
            .providers
            .iter()
            .position(|p| p.selector == selector && p.provider.name() == provider.name());

        match (existing, on_conflict) {
            (Some(_), OnConflict::Reject) => Err(RegistryError::DuplicateRegistration {
                kind: "metadata provider",
                key: selector.to_string(),
                name: provider.name().to_string(),
            }),
            (Some(index), OnConflict::Replace) => {
                info!(object_type = %selector, provider = provider.name(), "Replaced metadata provider");
                self.providers[index].provider = provider;
                Ok(())
            }
            (None, _) => {
                debug!(object_type = %selector, provider = provider.name(), "Registered metadata provider");
                self.providers.push(ProviderRegistration { selector, provider });
                Ok(())
            }
        }
    }

    /// Subscriptions matching `event_type`, in registration order.
    pub fn lookup_event(&self, event_type: &str) -> Vec<&Subscription> {
        self.subscriptions
            .iter()
            .filter(|s| s.pattern.matches(event_type))
            .collect()
    }

    /// Providers applying to `object_type`, in registration order.
    pub fn lookup_metadata(&self, object_type: &str) -> Vec<&ProviderRegistration> {
        self.providers
            .iter()
            .filter(|p| p.selector.matches(object_type))
            .collect()
    }

    pub fn handler_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}
