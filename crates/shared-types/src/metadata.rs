//! # Metadata Values
//!
//! Attribute maps are `serde_json` objects built with `preserve_order`, so
//! iteration follows insertion order.

use serde_json::{Map, Value};

/// A metadata value: scalar or nested map.
pub type MetadataValue = Value;

/// Ordered attribute map (`key -> value`).
pub type Attributes = Map<String, Value>;

/// Context handed to metadata providers for one outbound mutation.
pub type MetadataContext = Map<String, Value>;

/// Object types of the payment provider that accept metadata.
pub mod object_types {
    pub const CUSTOMER: &str = "customer";
    pub const SUBSCRIPTION: &str = "subscription";
    pub const PLAN: &str = "plan";
    pub const PRICE: &str = "price";
    pub const PRODUCT: &str = "product";
    pub const CHARGE: &str = "charge";
    pub const INVOICE: &str = "invoice";
    pub const PAYMENT_INTENT: &str = "payment_intent";
}
