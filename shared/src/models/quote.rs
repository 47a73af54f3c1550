//! Quote Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::breakdown::QuoteBreakdown;
use crate::status::QuoteStatus;

/// A single product line on a quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    /// Unit price in USD
    pub unit_price_usd: f64,
    /// Unit weight in kilograms
    pub weight_kg: f64,
    /// Customs classification code, optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
    /// Whether the item opts into its HSN duty rate instead of the
    /// destination country default
    #[serde(default)]
    pub use_hsn_rate: bool,
    /// Per-item discount percentage (0-100)
    #[serde(default)]
    pub discount_percentage: f64,
}

impl QuoteItem {
    /// An item participates in calculation only when it has a name and a
    /// positive price. Incomplete rows are draft rows, not errors.
    pub fn is_calculable(&self) -> bool {
        !self.name.trim().is_empty() && self.unit_price_usd > 0.0 && self.quantity > 0
    }
}

/// Shipping method selected for a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    Economy,
}

impl ShippingMethod {
    /// Shipping rate in USD per kilogram
    pub fn rate_per_kg(&self) -> f64 {
        match self {
            Self::Standard => 12.0,
            Self::Express => 25.0,
            Self::Economy => 8.0,
        }
    }
}

/// How the handling fee is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlingFeeType {
    #[default]
    None,
    Fixed,
    Percentage,
    Both,
}

/// Order-level discount
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderDiscount {
    /// Percentage of the running total (0-100)
    Percentage { value: f64 },
    /// Fixed USD amount, capped so the total never goes negative
    Fixed { amount: f64 },
}

impl OrderDiscount {
    /// Percentages must be 0-100, fixed amounts non-negative
    pub fn is_in_range(&self) -> bool {
        match self {
            Self::Percentage { value } => (0.0..=100.0).contains(value),
            Self::Fixed { amount } => *amount >= 0.0,
        }
    }
}

/// Shipping-level discount
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShippingDiscount {
    /// Percentage of base shipping (0-100)
    Percentage { value: f64 },
    /// Fixed USD amount off base shipping
    Fixed { amount: f64 },
    /// Shipping fully waived
    Free,
}

impl ShippingDiscount {
    /// Percentages must be 0-100, fixed amounts non-negative
    pub fn is_in_range(&self) -> bool {
        match self {
            Self::Percentage { value } => (0.0..=100.0).contains(value),
            Self::Fixed { amount } => *amount >= 0.0,
            Self::Free => true,
        }
    }
}

/// Quote entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub status: QuoteStatus,
    /// ISO 3166-1 alpha-2, e.g. "US"
    pub origin_country: String,
    pub destination_country: String,
    pub items: Vec<QuoteItem>,
    pub shipping_method: ShippingMethod,
    pub insurance_required: bool,
    pub handling_fee_type: HandlingFeeType,
    /// Selected payment gateway id, optional until checkout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_discount: Option<OrderDiscount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_discount: Option<ShippingDiscount>,
    /// Computed breakdown; always derivable from items + route + fees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation_data: Option<QuoteBreakdown>,
    /// Customer email for status notifications, optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// ISO 4217 code of the customer's display currency
    pub customer_currency: String,
    pub total_usd: f64,
    pub total_customer_currency: f64,
    /// Opaque token for customer-facing share links
    pub share_token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create quote payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteCreate {
    #[validate(length(equal = 2, message = "origin_country must be an ISO alpha-2 code"))]
    pub origin_country: String,
    #[validate(length(equal = 2, message = "destination_country must be an ISO alpha-2 code"))]
    pub destination_country: String,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<QuoteItemCreate>,
    #[serde(default)]
    pub shipping_method: ShippingMethod,
    #[serde(default)]
    pub insurance_required: bool,
    #[serde(default)]
    pub handling_fee_type: HandlingFeeType,
    pub customer_currency: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
}

/// Create quote item payload
///
/// Incomplete rows (empty name, zero price) are accepted and stored; the
/// calculator skips them until they are filled in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteItemCreate {
    pub name: String,
    pub quantity: u32,
    #[validate(range(min = 0.0, message = "unit_price_usd must not be negative"))]
    pub unit_price_usd: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "weight_kg must not be negative"))]
    pub weight_kg: f64,
    pub hsn_code: Option<String>,
    #[serde(default)]
    pub use_hsn_rate: bool,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "discount_percentage must be 0-100"))]
    pub discount_percentage: f64,
}

/// Update quote payload
///
/// Every accepted update triggers a recalculation of `calculation_data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteUpdate {
    pub origin_country: Option<String>,
    pub destination_country: Option<String>,
    pub items: Option<Vec<QuoteItemCreate>>,
    pub shipping_method: Option<ShippingMethod>,
    pub insurance_required: Option<bool>,
    pub handling_fee_type: Option<HandlingFeeType>,
    pub payment_gateway: Option<String>,
    pub order_discount: Option<OrderDiscount>,
    pub shipping_discount: Option<ShippingDiscount>,
    pub customer_currency: Option<String>,
    pub customer_email: Option<String>,
}
