//! Delivery Address Model
//!
//! Most countries use a flat address shape. Nepal uses a hierarchical
//! province / district / municipality / ward shape instead of a postal
//! code, so those fields are optional here and enforced per country by the
//! server-side validator.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Delivery address entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub id: String,
    pub user_id: String,
    pub recipient_name: String,
    pub phone: String,
    /// ISO 3166-1 alpha-2
    pub country: String,
    // Flat shape (everywhere but Nepal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    // Hierarchical shape (Nepal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward: Option<u32>,
    pub is_default: bool,
}

/// Create address payload
///
/// Country-specific shape rules (flat vs. hierarchical) are enforced by the
/// server-side validator on top of these field-level checks.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeliveryAddressCreate {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1, message = "recipient_name is required"))]
    pub recipient_name: String,
    #[validate(length(min = 5, message = "phone is required"))]
    pub phone: String,
    #[validate(length(equal = 2, message = "country must be an ISO alpha-2 code"))]
    pub country: String,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub municipality: Option<String>,
    pub ward: Option<u32>,
    #[serde(default)]
    pub is_default: bool,
}
