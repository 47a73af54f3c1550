//! Country reference data

use serde::{Deserialize, Serialize};

/// Country reference row
///
/// Rates are fractions (0.10 = 10%). `rate_from_usd` is the seed exchange
/// rate used until the live rate cache has refreshed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code
    pub code: String,
    pub name: String,
    /// ISO 4217 currency code
    pub currency: String,
    pub symbol: String,
    pub rate_from_usd: f64,
    /// Default customs duty rate when no HSN override applies
    pub customs_default_rate: f64,
    pub local_tax_rate: f64,
    /// Destination-specific tax name ("VAT", "GST", ...)
    pub local_tax_name: String,
    pub minimum_payment_amount: f64,
    pub shipping_allowed: bool,
}

/// HSN classification row: customs duty rate by code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HsnRate {
    pub code: String,
    pub description: String,
    pub duty_rate: f64,
}
