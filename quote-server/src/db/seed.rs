//! Embedded reference data
//!
//! Countries, HSN duty rates, and payment gateways loaded at startup.
//! Rates are fractions; exchange rates are USD-based seeds that the live
//! rate cache overrides once refreshed.

use shared::models::{Country, FeeSchedule, GatewayFlow, HsnRate, PaymentGateway};

use super::store::MemoryStore;

fn country(
    code: &str,
    name: &str,
    currency: &str,
    symbol: &str,
    rate_from_usd: f64,
    customs_default_rate: f64,
    local_tax_rate: f64,
    local_tax_name: &str,
    minimum_payment_amount: f64,
    shipping_allowed: bool,
) -> Country {
    Country {
        code: code.into(),
        name: name.into(),
        currency: currency.into(),
        symbol: symbol.into(),
        rate_from_usd,
        customs_default_rate,
        local_tax_rate,
        local_tax_name: local_tax_name.into(),
        minimum_payment_amount,
        shipping_allowed,
    }
}

/// Load all embedded reference rows into the store
pub fn load_reference_data(store: &MemoryStore) {
    for c in default_countries() {
        store.countries.insert(c.code.clone(), c);
    }
    for h in default_hsn_rates() {
        store.hsn_rates.insert(h.code.clone(), h);
    }
    for g in default_gateways() {
        store.gateways.insert(g.id.clone(), g);
    }
    tracing::info!(
        countries = store.countries.len(),
        hsn_rates = store.hsn_rates.len(),
        gateways = store.gateways.len(),
        "reference data loaded"
    );
}

/// Destination/origin country table
pub fn default_countries() -> Vec<Country> {
    vec![
        country("US", "United States", "USD", "$", 1.0, 0.0, 0.0, "Sales Tax", 1.0, true),
        country("NP", "Nepal", "NPR", "रू", 132.5, 0.30, 0.13, "VAT", 10.0, true),
        country("IN", "India", "INR", "₹", 83.2, 0.28, 0.18, "GST", 5.0, true),
        country("GB", "United Kingdom", "GBP", "£", 0.79, 0.04, 0.20, "VAT", 1.0, true),
        country("AU", "Australia", "AUD", "A$", 1.52, 0.05, 0.10, "GST", 1.0, true),
        country("CA", "Canada", "CAD", "C$", 1.36, 0.06, 0.05, "GST", 1.0, true),
        country("JP", "Japan", "JPY", "¥", 148.0, 0.04, 0.10, "Consumption Tax", 100.0, true),
        country("DE", "Germany", "EUR", "€", 0.92, 0.04, 0.19, "VAT", 1.0, true),
        country("BD", "Bangladesh", "BDT", "৳", 117.5, 0.25, 0.15, "VAT", 10.0, false),
    ]
}

/// HSN customs classification table (subset)
pub fn default_hsn_rates() -> Vec<HsnRate> {
    let rate = |code: &str, desc: &str, duty: f64| HsnRate {
        code: code.into(),
        description: desc.into(),
        duty_rate: duty,
    };
    vec![
        rate("6109", "T-shirts, knitted", 0.20),
        rate("6403", "Footwear, leather", 0.25),
        rate("8517", "Telephones and smartphones", 0.10),
        rate("8471", "Computers and laptops", 0.05),
        rate("9102", "Wrist-watches", 0.15),
        rate("3304", "Beauty and makeup preparations", 0.30),
        rate("9503", "Toys", 0.12),
        rate("4202", "Handbags and cases", 0.22),
    ]
}

/// Configured payment gateways
pub fn default_gateways() -> Vec<PaymentGateway> {
    vec![
        PaymentGateway {
            id: "stripe".into(),
            name: "Stripe".into(),
            supported_countries: vec![],
            supported_currencies: vec!["USD".into(), "GBP".into(), "EUR".into(), "AUD".into(), "CAD".into(), "JPY".into()],
            fees: FeeSchedule { percent: 2.9, fixed: 0.30 },
            flow: GatewayFlow::Inline,
            is_active: true,
        },
        PaymentGateway {
            id: "payu".into(),
            name: "PayU".into(),
            supported_countries: vec!["IN".into()],
            supported_currencies: vec!["INR".into(), "USD".into()],
            fees: FeeSchedule { percent: 2.3, fixed: 0.0 },
            flow: GatewayFlow::Redirect,
            is_active: true,
        },
        PaymentGateway {
            id: "esewa".into(),
            name: "eSewa".into(),
            supported_countries: vec!["NP".into()],
            supported_currencies: vec!["NPR".into()],
            fees: FeeSchedule { percent: 1.5, fixed: 0.0 },
            flow: GatewayFlow::Redirect,
            is_active: true,
        },
        PaymentGateway {
            id: "fonepay".into(),
            name: "Fonepay".into(),
            supported_countries: vec!["NP".into()],
            supported_currencies: vec!["NPR".into()],
            fees: FeeSchedule { percent: 1.8, fixed: 0.0 },
            flow: GatewayFlow::QrCode,
            is_active: true,
        },
        PaymentGateway {
            id: "bank_transfer".into(),
            name: "Bank Transfer".into(),
            supported_countries: vec![],
            supported_currencies: vec![],
            fees: FeeSchedule { percent: 0.0, fixed: 0.0 },
            flow: GatewayFlow::Redirect,
            is_active: true,
        },
    ]
}
