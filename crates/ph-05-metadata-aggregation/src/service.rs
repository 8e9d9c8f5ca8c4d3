//! # Metadata Aggregator Service

use crate::domain::contribution::{MergedMetadata, MetadataContribution, SkippedProvider};
use crate::domain::errors::AggregationProviderError;
use crate::domain::merge::apply_contribution;
use ph_03_subscriber_registry::{ProviderRegistration, SubscriberRegistry};
use shared_types::{panic_message, MetadataContext};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Merged metadata plus the providers that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationReport {
    pub merged: MergedMetadata,
    pub skipped: Vec<SkippedProvider>,
}

/// Aggregates provider contributions from a shared, read-only registry.
#[derive(Debug, Clone)]
pub struct MetadataAggregator {
    registry: Arc<SubscriberRegistry>,
}

impl MetadataAggregator {
    pub fn new(registry: Arc<SubscriberRegistry>) -> Self {
        Self { registry }
    }

    /// Merged attributes for `object_type`. Never fails.
    pub fn aggregate(&self, object_type: &str, context: &MetadataContext) -> MergedMetadata {
        self.aggregate_with_report(object_type, context).merged
    }

    pub fn aggregate_with_report(
        &self,
        object_type: &str,
        context: &MetadataContext,
    ) -> AggregationReport {
        let mut merged = MergedMetadata::empty(object_type);
        let mut skipped = Vec::new();

        for registration in self.registry.lookup_metadata(object_type) {
            match run_provider(registration, object_type, context) {
                Ok(contributions) => {
                    for contribution in contributions {
                        apply_contribution(&mut merged.attributes, contribution);
                    }
                }
                Err(e) => {
                    warn!(object_type, error = %e, "Skipping metadata provider");
                    skipped.push(SkippedProvider::from(e));
                }
            }
        }

        debug!(
            object_type,
            keys = merged.attributes.len(),
            skipped = skipped.len(),
            "Metadata aggregated"
        );
        AggregationReport { merged, skipped }
    }
}

/// Runs one provider, turning its error or panic into a skip.
fn run_provider(
    registration: &ProviderRegistration,
    object_type: &str,
    context: &MetadataContext,
) -> Result<Vec<MetadataContribution>, AggregationProviderError> {
    let provider = &registration.provider;
    let result = panic::catch_unwind(AssertUnwindSafe(|| provider.contribute(object_type, context)));

    let attributes = match result {
        Ok(Ok(attributes)) => attributes,
        Ok(Err(e)) => {
            return Err(AggregationProviderError::ProviderFailed {
                provider: provider.name().to_string(),
                reason: e.to_string(),
            })
        }
        Err(payload) => {
            return Err(AggregationProviderError::ProviderFailed {
                provider: provider.name().to_string(),
                reason: format!("provider panicked: {}", panic_message(payload.as_ref())),
            })
        }
    };

    Ok(attributes
        .into_iter()
        .map(|(key, value)| MetadataContribution {
            provider: provider.name().to_string(),
            object_type: object_type.to_string(),
            key,
            value,
        })
        .collect())
}
