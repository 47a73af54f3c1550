//! Quote intake and recalculation
//!
//! Every accepted mutation re-runs the landed-cost calculator. The
//! breakdown is always derivable from items + route + fee configuration;
//! recalculation is idempotent and has no side effects of its own.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use uuid::Uuid;

use shared::models::{Quote, QuoteCreate, QuoteItem, QuoteItemCreate, QuoteUpdate, TransitionTrigger};
use shared::{ApiError, QuoteStatus};

use crate::currency::CurrencyService;
use crate::db::{CountryRepository, GatewayRepository, QuoteRepository};
use crate::pricing::{calculate, CalculationInput};
use crate::status::StatusEngine;
use crate::utils::AppResult;

/// Statuses in which a quote may still be edited
const EDITABLE: [QuoteStatus; 4] = [
    QuoteStatus::Pending,
    QuoteStatus::Calculated,
    QuoteStatus::Sent,
    QuoteStatus::Approved,
];

#[derive(Clone)]
pub struct QuoteService {
    quotes: QuoteRepository,
    countries: CountryRepository,
    gateways: GatewayRepository,
    currency: CurrencyService,
    engine: StatusEngine,
    quote_ttl_days: i64,
    default_insurance_rate: f64,
}

impl QuoteService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        quotes: QuoteRepository,
        countries: CountryRepository,
        gateways: GatewayRepository,
        currency: CurrencyService,
        engine: StatusEngine,
        quote_ttl_days: i64,
        default_insurance_rate: f64,
    ) -> Self {
        Self {
            quotes,
            countries,
            gateways,
            currency,
            engine,
            quote_ttl_days,
            default_insurance_rate,
        }
    }

    /// Create a quote, calculate it, and advance it to `calculated` when
    /// it already has calculable items
    pub async fn create(&self, data: QuoteCreate) -> AppResult<Quote> {
        let destination = data.destination_country.to_uppercase();
        let customer_currency = match data.customer_currency {
            Some(c) => c.to_uppercase(),
            None => self
                .currency
                .currency_for_country(&destination)
                .await
                .unwrap_or_else(|_| "USD".to_string()),
        };

        let now = Utc::now();
        let mut quote = Quote {
            id: Uuid::new_v4().to_string(),
            status: QuoteStatus::Pending,
            origin_country: data.origin_country.to_uppercase(),
            destination_country: destination,
            items: data.items.into_iter().map(new_item).collect(),
            shipping_method: data.shipping_method,
            insurance_required: data.insurance_required,
            handling_fee_type: data.handling_fee_type,
            payment_gateway: None,
            order_discount: None,
            shipping_discount: None,
            calculation_data: None,
            customer_email: data.customer_email,
            customer_currency,
            total_usd: 0.0,
            total_customer_currency: 0.0,
            share_token: Uuid::new_v4().to_string(),
            expires_at: now + Duration::days(self.quote_ttl_days),
            created_at: now,
            updated_at: now,
        };

        self.recalculate(&mut quote).await;
        let quote = self.quotes.create(quote).await?;

        self.advance_to_calculated(&quote).await;
        Ok(self
            .quotes
            .find_by_id(&quote.id)
            .await?
            .unwrap_or(quote))
    }

    /// Apply an update and recalculate
    pub async fn update(&self, id: &str, data: QuoteUpdate) -> AppResult<Quote> {
        let mut quote = self
            .quotes
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("quote {}", id)))?;

        if !EDITABLE.contains(&quote.status) {
            return Err(ApiError::business_rule(format!(
                "quote in status {} cannot be edited",
                quote.status
            )));
        }

        if let Some(origin) = data.origin_country {
            quote.origin_country = origin.to_uppercase();
        }
        if let Some(dest) = data.destination_country {
            quote.destination_country = dest.to_uppercase();
        }
        if let Some(items) = data.items {
            quote.items = items.into_iter().map(new_item).collect();
        }
        if let Some(method) = data.shipping_method {
            quote.shipping_method = method;
        }
        if let Some(insurance) = data.insurance_required {
            quote.insurance_required = insurance;
        }
        if let Some(fee_type) = data.handling_fee_type {
            quote.handling_fee_type = fee_type;
        }
        if let Some(gateway) = data.payment_gateway {
            quote.payment_gateway = Some(gateway);
        }
        if let Some(discount) = data.order_discount {
            quote.order_discount = Some(discount);
        }
        if let Some(discount) = data.shipping_discount {
            quote.shipping_discount = Some(discount);
        }
        if let Some(currency) = data.customer_currency {
            quote.customer_currency = currency.to_uppercase();
        }
        if let Some(email) = data.customer_email {
            quote.customer_email = Some(email);
        }

        self.recalculate(&mut quote).await;
        quote.updated_at = Utc::now();
        let quote = self.quotes.update(quote).await?;

        self.advance_to_calculated(&quote).await;
        Ok(self
            .quotes
            .find_by_id(&quote.id)
            .await?
            .unwrap_or(quote))
    }

    /// Re-run the calculator against current reference data
    ///
    /// Pure with respect to the quote: same items + route + fees always
    /// produce the same breakdown.
    pub async fn recalculate(&self, quote: &mut Quote) {
        let destination = self.destination_row(quote).await;

        let mut hsn_rates: HashMap<String, f64> = HashMap::new();
        for item in &quote.items {
            if let (Some(code), true) = (&item.hsn_code, item.use_hsn_rate) {
                if !hsn_rates.contains_key(code) {
                    if let Ok(Some(rate)) = self.countries.find_hsn(code).await {
                        hsn_rates.insert(code.clone(), rate.duty_rate);
                    }
                }
            }
        }

        let gateway = match &quote.payment_gateway {
            Some(id) => self.gateways.find_by_id(id).await.ok().flatten(),
            None => None,
        };

        // Carry the previously used insurance rate when the stored
        // breakdown is on the current schema
        let carried_insurance_rate = quote
            .calculation_data
            .as_ref()
            .filter(|b| b.is_current_version())
            .map(|b| b.insurance_rate);

        let exchange_rate = self.currency.usd_rate_or_fallback(&quote.customer_currency);

        let breakdown = calculate(&CalculationInput {
            items: &quote.items,
            destination: destination.as_ref(),
            shipping_method: quote.shipping_method,
            insurance_required: quote.insurance_required,
            handling_fee_type: quote.handling_fee_type,
            gateway: gateway.as_ref(),
            order_discount: quote.order_discount,
            shipping_discount: quote.shipping_discount,
            hsn_rates: &hsn_rates,
            carried_insurance_rate,
            default_insurance_rate: self.default_insurance_rate,
            customer_currency: &quote.customer_currency,
            exchange_rate,
        });

        quote.total_usd = breakdown.total_usd;
        quote.total_customer_currency = breakdown.total_customer_currency;
        quote.calculation_data = Some(breakdown);
    }

    async fn destination_row(&self, quote: &Quote) -> Option<shared::models::Country> {
        match self
            .countries
            .find_by_code(&quote.destination_country)
            .await
        {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, "country lookup failed during recalculation");
                None
            }
        }
    }

    /// Move a freshly calculated quote from `pending` to `calculated`.
    /// Best-effort: a transition failure leaves the quote in `pending`.
    async fn advance_to_calculated(&self, quote: &Quote) {
        let has_calculated_items = quote
            .calculation_data
            .as_ref()
            .is_some_and(|b| b.calculated_items > 0);
        if quote.status == QuoteStatus::Pending && has_calculated_items {
            if let Err(e) = self
                .engine
                .transition_quote(
                    &quote.id,
                    QuoteStatus::Pending,
                    QuoteStatus::Calculated,
                    TransitionTrigger::AutoCalculation,
                    None,
                )
                .await
            {
                tracing::warn!(quote_id = %quote.id, error = %e, "auto transition failed");
            }
        }
    }
}

fn new_item(data: QuoteItemCreate) -> QuoteItem {
    QuoteItem {
        id: Uuid::new_v4().to_string(),
        name: data.name,
        quantity: data.quantity,
        unit_price_usd: data.unit_price_usd,
        weight_kg: data.weight_kg,
        hsn_code: data.hsn_code,
        use_hsn_rate: data.use_hsn_rate,
        discount_percentage: data.discount_percentage,
    }
}
