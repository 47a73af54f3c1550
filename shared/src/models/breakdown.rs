//! Quote cost breakdown
//!
//! The versioned result of a landed-cost calculation. Stored on the quote
//! as `calculation_data` and validated at the boundary instead of being
//! carried as free-form JSON.

use serde::{Deserialize, Serialize};

/// Current breakdown schema version
pub const BREAKDOWN_VERSION: u32 = 2;

/// Landed-cost breakdown, all amounts in USD rounded to 2 decimal places
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// Schema version tag; rejected at the boundary when unknown
    pub version: u32,
    /// Sum of valid item lines after per-item discounts
    pub items_subtotal: f64,
    /// Weight-based shipping after shipping discount
    pub shipping: f64,
    /// Base shipping before any shipping discount
    pub shipping_before_discount: f64,
    /// Customs duty (HSN override or destination default rate)
    pub customs_duty: f64,
    /// Duty rate actually applied, as a fraction
    pub customs_rate: f64,
    /// Local tax on (subtotal + duty)
    pub local_tax: f64,
    /// Destination-specific tax name, e.g. "VAT", "GST"
    pub local_tax_name: String,
    pub handling_fee: f64,
    pub gateway_fee: f64,
    pub insurance: f64,
    /// Insurance rate used, carried over on recalculation
    pub insurance_rate: f64,
    /// Order-level discount actually applied (already capped)
    pub order_discount: f64,
    pub total_usd: f64,
    pub total_customer_currency: f64,
    pub customer_currency: String,
    /// USD -> customer currency rate used for the conversion
    pub exchange_rate: f64,
    /// Number of item rows that participated in the calculation
    pub calculated_items: u32,
}

impl QuoteBreakdown {
    /// Check the schema version tag
    pub fn is_current_version(&self) -> bool {
        self.version == BREAKDOWN_VERSION
    }
}
