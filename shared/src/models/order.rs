//! Order Model
//!
//! A quote becomes an order once payment is received. The order carries a
//! frozen copy of the breakdown that was paid for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::breakdown::QuoteBreakdown;
use crate::status::OrderStatus;

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub quote_id: String,
    pub status: OrderStatus,
    pub destination_country: String,
    /// Breakdown at payment time; never recalculated
    pub paid_breakdown: QuoteBreakdown,
    pub paid_amount_usd: f64,
    pub customer_currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
