//! # Outbound Ports (Extension Capabilities)
//!
//! Traits implemented by extensions that plug into the hub.

use async_trait::async_trait;
use shared_types::{Attributes, Event, HandlerError, MetadataContext, ProviderError};

/// Reacts to verified payment events.
///
/// Handlers run one at a time per event, under a per-handler timeout. A
/// failing or panicking handler is recorded and does not affect the others.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Stable name used for duplicate detection and in dispatch reports.
    fn name(&self) -> &str;

    async fn handle(&self, event: &Event) -> Result<(), HandlerError>;
}

/// Contributes attributes to an outbound create/update call.
///
/// Called synchronously by the aggregator; providers should only compute
/// values, not perform slow I/O.
pub trait MetadataProvider: Send + Sync {
    /// Stable name used for duplicate detection and in warnings.
    fn name(&self) -> &str;

    /// Returns the attributes this provider adds for `object_type`.
    fn contribute(
        &self,
        object_type: &str,
        context: &MetadataContext,
    ) -> Result<Attributes, ProviderError>;
}
