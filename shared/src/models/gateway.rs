//! Payment Gateway Model

use serde::{Deserialize, Serialize};

/// How the customer completes payment after selecting a gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayFlow {
    /// Browser redirect to the gateway's hosted page
    Redirect,
    /// Card fields collected inline
    Inline,
    /// Regional wallet QR code
    QrCode,
}

/// Fee schedule consumed by the landed-cost calculator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Percentage of the running subtotal (0-100)
    pub percent: f64,
    /// Fixed USD component
    pub fixed: f64,
}

/// Payment gateway descriptor - reference data, never mutated by this system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentGateway {
    pub id: String,
    pub name: String,
    /// ISO country codes this gateway serves; empty = all
    pub supported_countries: Vec<String>,
    /// ISO currency codes this gateway settles; empty = all
    pub supported_currencies: Vec<String>,
    pub fees: FeeSchedule,
    pub flow: GatewayFlow,
    pub is_active: bool,
}

impl PaymentGateway {
    /// Whether this gateway can serve the given destination and currency
    pub fn supports(&self, country: &str, currency: &str) -> bool {
        let country_ok = self.supported_countries.is_empty()
            || self.supported_countries.iter().any(|c| c == country);
        let currency_ok = self.supported_currencies.is_empty()
            || self.supported_currencies.iter().any(|c| c == currency);
        self.is_active && country_ok && currency_ok
    }
}

/// Payment transaction row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub id: String,
    pub quote_id: String,
    pub gateway_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Payment transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Created,
    Succeeded,
    Failed,
}
