//! Contribution and merge result types.

use crate::domain::errors::AggregationProviderError;
use serde::Serialize;
use shared_types::{Attributes, MetadataValue};

/// One attribute offered by one provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataContribution {
    pub provider: String,
    pub object_type: String,
    pub key: String,
    pub value: MetadataValue,
}

/// Final attributes for an outbound create/update call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedMetadata {
    pub object_type: String,
    pub attributes: Attributes,
}

impl MergedMetadata {
    pub fn empty(object_type: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.attributes.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }
}

/// A provider left out of the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedProvider {
    pub provider: String,
    pub reason: String,
}

impl From<AggregationProviderError> for SkippedProvider {
    fn from(error: AggregationProviderError) -> Self {
        match error {
            AggregationProviderError::ProviderFailed { provider, reason } => {
                Self { provider, reason }
            }
        }
    }
}
