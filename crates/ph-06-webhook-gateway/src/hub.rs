//! # Payment Hub
//!
//! Composition root: one registry, one deduplicator, one dispatcher, one
//! aggregator, built from a validated `HubConfig`.

use crate::domain::config::{ConfigError, HubConfig};
use crate::domain::error::GatewayError;
use crate::gateway::WebhookGateway;
use crate::router::build_router;
use crate::service::WebhookGatewayService;
use axum::http::HeaderName;
use axum::Router;
use ph_01_signature_verification::SignatureVerifier;
use ph_02_event_dedup::{DedupStore, EventDeduplicator, InMemoryDedupStore};
use ph_03_subscriber_registry::SubscriberRegistry;
use ph_04_event_dispatch::EventDispatcher;
use ph_05_metadata_aggregation::{MergedMetadata, MetadataAggregator};
use shared_types::{MetadataContext, SystemTimeSource, TimeSource};
use std::sync::Arc;
use tracing::info;

pub struct PaymentHub {
    config: HubConfig,
    registry: Arc<SubscriberRegistry>,
    dedup: Arc<EventDeduplicator>,
    gateway: Arc<WebhookGateway>,
    aggregator: MetadataAggregator,
}

impl PaymentHub {
    /// Builds the hub around a fully populated registry.
    ///
    /// # Errors
    ///
    /// `GatewayError::Config` if the configuration does not validate.
    pub fn new(
        config: HubConfig,
        registry: SubscriberRegistry,
        store: Arc<dyn DedupStore>,
    ) -> Result<Self, GatewayError> {
        Self::with_time_source(config, registry, store, Arc::new(SystemTimeSource))
    }

    /// Same as `new`, with the in-memory dedup store.
    pub fn in_memory(config: HubConfig, registry: SubscriberRegistry) -> Result<Self, GatewayError> {
        Self::new(config, registry, Arc::new(InMemoryDedupStore::new()))
    }

    pub fn with_time_source(
        config: HubConfig,
        registry: SubscriberRegistry,
        store: Arc<dyn DedupStore>,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;

        let signature_header = HeaderName::from_bytes(config.signature_header.as_bytes())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let registry = Arc::new(registry);

        let verifier = SignatureVerifier::new(config.secret_ring())
            .with_tolerance(config.signature_tolerance_seconds)
            .with_time_source(Arc::clone(&time_source));
        let dedup = Arc::new(EventDeduplicator::with_time_source(
            store,
            config.dedup_config(),
            time_source,
        ));
        let dispatcher = Arc::new(EventDispatcher::new(
            Arc::clone(&registry),
            config.handler_timeout(),
        ));

        let gateway = WebhookGateway::new(
            Arc::new(verifier),
            Arc::clone(&dedup),
            dispatcher,
            signature_header,
        )
        .with_dedup_unavailable_policy(config.on_dedup_unavailable)
        .with_duplicate_response(config.duplicate_response);

        let aggregator = MetadataAggregator::new(Arc::clone(&registry));

        info!(
            handlers = registry.handler_count(),
            providers = registry.provider_count(),
            "Payment hub assembled"
        );

        Ok(Self {
            config,
            registry,
            dedup,
            gateway: Arc::new(gateway),
            aggregator,
        })
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    pub fn gateway(&self) -> &Arc<WebhookGateway> {
        &self.gateway
    }

    pub fn aggregator(&self) -> &MetadataAggregator {
        &self.aggregator
    }

    pub fn dedup(&self) -> &Arc<EventDeduplicator> {
        &self.dedup
    }

    /// Router for embedding into an existing axum application.
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.gateway), self.config.max_body_bytes)
    }

    /// Metadata for an outbound create/update of `object_type`.
    pub fn aggregate(&self, object_type: &str, context: &MetadataContext) -> MergedMetadata {
        self.aggregator.aggregate(object_type, context)
    }

    /// Standalone server bound to `config.bind_addr`.
    pub fn into_service(self) -> WebhookGatewayService {
        let router = self.router();
        WebhookGatewayService::new(self.config, router, self.dedup)
    }
}
