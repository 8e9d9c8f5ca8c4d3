//! # Deep Merge
//!
//! Pure merge functions over ordered JSON maps.

use crate::domain::contribution::MetadataContribution;
use shared_types::{Attributes, MetadataValue};

/// Merges `incoming` into `target`.
///
/// Maps merge key by key. Anything else (scalars, arrays, a map meeting a
/// scalar) is replaced by `incoming`. Existing keys keep their position.
pub fn deep_merge(target: &mut MetadataValue, incoming: MetadataValue) {
    match (target, incoming) {
        (MetadataValue::Object(existing), MetadataValue::Object(incoming)) => {
            merge_maps(existing, incoming);
        }
        (target, incoming) => *target = incoming,
    }
}

fn merge_maps(existing: &mut Attributes, incoming: Attributes) {
    for (key, value) in incoming {
        match existing.get_mut(&key) {
            Some(slot) => deep_merge(slot, value),
            None => {
                existing.insert(key, value);
            }
        }
    }
}

/// Applies a single contribution to an attribute map.
pub fn apply_contribution(attributes: &mut Attributes, contribution: MetadataContribution) {
    match attributes.get_mut(&contribution.key) {
        Some(slot) => deep_merge(slot, contribution.value),
        None => {
            attributes.insert(contribution.key, contribution.value);
        }
    }
}
