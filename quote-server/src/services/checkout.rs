//! Checkout service
//!
//! Gateway selection per destination country/currency, payment creation
//! through the "create-payment-link" function, and the success webhook
//! that turns a paid quote into an order.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use shared::models::{
    GatewayFlow, Order, PaymentGateway, PaymentStatus, PaymentTransaction, TransitionTrigger,
};
use shared::{ApiError, OrderStatus, QuoteStatus};

use crate::currency::CurrencyService;
use crate::db::{
    CountryRepository, GatewayRepository, OrderRepository, PaymentRepository, QuoteRepository,
};
use crate::status::StatusEngine;
use crate::utils::AppResult;

use super::functions::FunctionClient;
use super::quote::QuoteService;

/// Result of creating a payment
#[derive(Debug, Serialize)]
pub struct PaymentSession {
    pub transaction_id: String,
    pub gateway_id: String,
    pub flow: GatewayFlow,
    /// Redirect/QR link returned by the function, when the flow needs one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<String>,
    pub amount: f64,
    pub currency: String,
    /// Amount formatted with the currency's symbol and precision
    pub display_amount: String,
}

/// Webhook body posted back by the payment function
#[derive(Debug, Deserialize)]
pub struct PaymentWebhook {
    pub transaction_id: String,
    pub success: bool,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Clone)]
pub struct CheckoutService {
    quotes: QuoteRepository,
    orders: OrderRepository,
    payments: PaymentRepository,
    gateways: GatewayRepository,
    countries: CountryRepository,
    currency: CurrencyService,
    quote_service: QuoteService,
    engine: StatusEngine,
    functions: FunctionClient,
}

impl CheckoutService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        quotes: QuoteRepository,
        orders: OrderRepository,
        payments: PaymentRepository,
        gateways: GatewayRepository,
        countries: CountryRepository,
        currency: CurrencyService,
        quote_service: QuoteService,
        engine: StatusEngine,
        functions: FunctionClient,
    ) -> Self {
        Self {
            quotes,
            orders,
            payments,
            gateways,
            countries,
            currency,
            quote_service,
            engine,
            functions,
        }
    }

    /// Gateways able to serve a destination country
    pub async fn available_gateways(&self, country_code: &str) -> AppResult<Vec<PaymentGateway>> {
        let country = self
            .countries
            .find_by_code(country_code)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("country {}", country_code)))?;
        if !country.shipping_allowed {
            return Err(ApiError::business_rule(format!(
                "shipping to {} is not available",
                country.name
            )));
        }
        let gateways = self
            .gateways
            .find_all_active()
            .await?
            .into_iter()
            .filter(|g| g.supports(&country.code, &country.currency))
            .collect();
        Ok(gateways)
    }

    /// Create a payment for an approved quote
    ///
    /// Selecting the gateway re-runs the calculator so the gateway fee is
    /// part of the amount charged.
    pub async fn create_payment(&self, quote_id: &str, gateway_id: &str) -> AppResult<PaymentSession> {
        let quote = self
            .quotes
            .find_by_id(quote_id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("quote {}", quote_id)))?;
        if quote.status != QuoteStatus::Approved {
            return Err(ApiError::business_rule(format!(
                "quote must be approved before payment, current status: {}",
                quote.status
            )));
        }

        let country = self
            .countries
            .find_by_code(&quote.destination_country)
            .await?
            .ok_or_else(|| {
                ApiError::not_found(format!("country {}", quote.destination_country))
            })?;
        let gateway = self
            .gateways
            .find_by_id(gateway_id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("gateway {}", gateway_id)))?;
        if !gateway.supports(&country.code, &quote.customer_currency) {
            return Err(ApiError::business_rule(format!(
                "gateway {} does not serve {} in {}",
                gateway.name, country.name, quote.customer_currency
            )));
        }

        // Attach the gateway and recalculate so its fee lands in the total
        let mut quote = quote;
        quote.payment_gateway = Some(gateway.id.clone());
        self.quote_service.recalculate(&mut quote).await;
        quote.updated_at = Utc::now();
        let quote = self.quotes.update(quote).await?;

        if quote.total_usd < country.minimum_payment_amount {
            return Err(ApiError::business_rule(format!(
                "total {} below the minimum payment amount {} for {}",
                quote.total_usd, country.minimum_payment_amount, country.name
            )));
        }

        let txn = PaymentTransaction {
            id: Uuid::new_v4().to_string(),
            quote_id: quote.id.clone(),
            gateway_id: gateway.id.clone(),
            amount: quote.total_customer_currency,
            currency: quote.customer_currency.clone(),
            status: PaymentStatus::Created,
            created_at: Utc::now(),
        };
        let txn = self.payments.create(txn).await?;

        let body = json!({
            "transaction_id": txn.id,
            "quote_id": quote.id,
            "gateway": gateway.id,
            "amount": txn.amount,
            "currency": txn.currency,
        });
        let payment_link = match self.functions.invoke("create-payment-link", &body).await {
            Ok(data) => data
                .get("payment_link")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            Err(e) => {
                return Err(ApiError::internal(format!(
                    "payment link creation failed: {}",
                    e
                )));
            }
        };

        let display_amount = self.currency.format(txn.amount, &txn.currency).await;
        Ok(PaymentSession {
            transaction_id: txn.id,
            gateway_id: gateway.id,
            flow: gateway.flow,
            payment_link,
            amount: txn.amount,
            currency: txn.currency,
            display_amount,
        })
    }

    /// Handle the gateway's webhook
    ///
    /// On success the quote transitions `approved -> paid` and an order is
    /// created with the breakdown frozen at payment time.
    pub async fn handle_webhook(&self, payload: PaymentWebhook) -> AppResult<Option<Order>> {
        let txn = self
            .payments
            .find_by_id(&payload.transaction_id)
            .await?
            .ok_or_else(|| {
                ApiError::not_found(format!("payment {}", payload.transaction_id))
            })?;

        if !payload.success {
            self.payments
                .set_status(&txn.id, PaymentStatus::Failed)
                .await?;
            tracing::info!(transaction_id = %txn.id, "payment failed");
            return Ok(None);
        }

        self.payments
            .set_status(&txn.id, PaymentStatus::Succeeded)
            .await?;

        let quote = self
            .engine
            .transition_quote(
                &txn.quote_id,
                QuoteStatus::Approved,
                QuoteStatus::Paid,
                TransitionTrigger::PaymentReceived,
                Some(json!({
                    "transaction_id": txn.id,
                    "reference": payload.reference,
                })),
            )
            .await?;

        let breakdown = quote.calculation_data.clone().ok_or_else(|| {
            ApiError::internal(format!("paid quote {} has no breakdown", quote.id))
        })?;
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            quote_id: quote.id.clone(),
            status: OrderStatus::Ordered,
            destination_country: quote.destination_country.clone(),
            paid_breakdown: breakdown,
            paid_amount_usd: quote.total_usd,
            customer_currency: quote.customer_currency.clone(),
            tracking_number: None,
            created_at: now,
            updated_at: now,
        };
        let order = self.orders.create(order).await?;
        tracing::info!(order_id = %order.id, quote_id = %quote.id, "order created from paid quote");
        Ok(Some(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use shared::models::{Quote, QuoteBreakdown};

    use crate::currency::RateCache;
    use crate::db::{EmailSettingsRepository, MemoryStore, TransitionRepository};
    use crate::services::EmailService;
    use crate::status::StatusFlows;
    use crate::utils::RetryPolicy;

    fn build(store: &MemoryStore) -> CheckoutService {
        let quotes = QuoteRepository::new(store.clone());
        let orders = OrderRepository::new(store.clone());
        let payments = PaymentRepository::new(store.clone());
        let gateways = GatewayRepository::new(store.clone());
        let countries = CountryRepository::new(store.clone());

        let cache = RateCache::new();
        cache.seed(
            store
                .countries
                .iter()
                .map(|c| (c.currency.clone(), c.rate_from_usd)),
        );
        let currency = CurrencyService::new(cache, countries.clone());

        let functions = FunctionClient::new("http://localhost:0", "", RetryPolicy::no_retry());
        let email = EmailService::new(
            functions.clone(),
            EmailSettingsRepository::new(store.clone()),
            false,
        );
        let engine = StatusEngine::new(
            Arc::new(StatusFlows::standard()),
            quotes.clone(),
            orders.clone(),
            TransitionRepository::new(store.clone()),
            email,
        );
        let quote_service = QuoteService::new(
            quotes.clone(),
            countries.clone(),
            gateways.clone(),
            currency.clone(),
            engine.clone(),
            7,
            0.015,
        );
        CheckoutService::new(
            quotes,
            orders,
            payments,
            gateways,
            countries,
            currency,
            quote_service,
            engine,
            functions,
        )
    }

    fn seed_approved_quote(store: &MemoryStore, id: &str) {
        let now = Utc::now();
        let breakdown = QuoteBreakdown {
            version: shared::models::BREAKDOWN_VERSION,
            total_usd: 29.38,
            total_customer_currency: 3892.85,
            customer_currency: "NPR".into(),
            exchange_rate: 132.5,
            calculated_items: 1,
            ..Default::default()
        };
        let quote = Quote {
            id: id.to_string(),
            status: QuoteStatus::Approved,
            origin_country: "US".into(),
            destination_country: "NP".into(),
            items: vec![],
            shipping_method: Default::default(),
            insurance_required: false,
            handling_fee_type: Default::default(),
            payment_gateway: Some("esewa".into()),
            order_discount: None,
            shipping_discount: None,
            calculation_data: Some(breakdown),
            customer_email: None,
            customer_currency: "NPR".into(),
            total_usd: 29.38,
            total_customer_currency: 3892.85,
            share_token: format!("tok-{}", id),
            expires_at: now + chrono::Duration::days(7),
            created_at: now,
            updated_at: now,
        };
        store.quotes.insert(quote.id.clone(), quote);
    }

    fn seed_transaction(store: &MemoryStore, id: &str, quote_id: &str) {
        let txn = PaymentTransaction {
            id: id.to_string(),
            quote_id: quote_id.to_string(),
            gateway_id: "esewa".into(),
            amount: 3892.85,
            currency: "NPR".into(),
            status: PaymentStatus::Created,
            created_at: Utc::now(),
        };
        store.payments.insert(txn.id.clone(), txn);
    }

    #[tokio::test]
    async fn test_available_gateways_filter_by_country_and_currency() {
        let store = MemoryStore::with_seed_data();
        let checkout = build(&store);

        let np = checkout.available_gateways("NP").await.unwrap();
        let ids: Vec<&str> = np.iter().map(|g| g.id.as_str()).collect();
        assert!(ids.contains(&"esewa"));
        assert!(ids.contains(&"fonepay"));
        assert!(!ids.contains(&"payu"));
    }

    #[tokio::test]
    async fn test_gateways_rejected_for_unserviceable_country() {
        let store = MemoryStore::with_seed_data();
        let checkout = build(&store);

        // BD is configured with shipping disabled
        assert!(checkout.available_gateways("BD").await.is_err());
        assert!(checkout.available_gateways("ZZ").await.is_err());
    }

    #[tokio::test]
    async fn test_successful_webhook_pays_quote_and_creates_order() {
        let store = MemoryStore::with_seed_data();
        let checkout = build(&store);
        seed_approved_quote(&store, "q1");
        seed_transaction(&store, "t1", "q1");

        let order = checkout
            .handle_webhook(PaymentWebhook {
                transaction_id: "t1".into(),
                success: true,
                reference: Some("ref-42".into()),
            })
            .await
            .unwrap()
            .expect("order should be created");

        assert_eq!(order.quote_id, "q1");
        assert_eq!(order.status, OrderStatus::Ordered);
        assert_eq!(order.paid_amount_usd, 29.38);
        assert_eq!(store.quotes.get("q1").unwrap().status, QuoteStatus::Paid);
        assert_eq!(
            store.payments.get("t1").unwrap().status,
            PaymentStatus::Succeeded
        );
    }

    #[tokio::test]
    async fn test_failed_webhook_marks_transaction_only() {
        let store = MemoryStore::with_seed_data();
        let checkout = build(&store);
        seed_approved_quote(&store, "q1");
        seed_transaction(&store, "t1", "q1");

        let order = checkout
            .handle_webhook(PaymentWebhook {
                transaction_id: "t1".into(),
                success: false,
                reference: None,
            })
            .await
            .unwrap();

        assert!(order.is_none());
        assert_eq!(
            store.payments.get("t1").unwrap().status,
            PaymentStatus::Failed
        );
        assert_eq!(store.quotes.get("q1").unwrap().status, QuoteStatus::Approved);
        assert!(store.orders.is_empty());
    }

    #[tokio::test]
    async fn test_webhook_on_non_approved_quote_does_not_create_order() {
        let store = MemoryStore::with_seed_data();
        let checkout = build(&store);
        seed_approved_quote(&store, "q1");
        {
            let mut entry = store.quotes.get_mut("q1").unwrap();
            entry.status = QuoteStatus::Rejected;
        }
        seed_transaction(&store, "t1", "q1");

        let result = checkout
            .handle_webhook(PaymentWebhook {
                transaction_id: "t1".into(),
                success: true,
                reference: None,
            })
            .await;

        assert!(result.is_err());
        assert!(store.orders.is_empty());
    }

    #[tokio::test]
    async fn test_create_payment_requires_approved_quote() {
        let store = MemoryStore::with_seed_data();
        let checkout = build(&store);
        seed_approved_quote(&store, "q1");
        {
            let mut entry = store.quotes.get_mut("q1").unwrap();
            entry.status = QuoteStatus::Sent;
        }

        assert!(checkout.create_payment("q1", "esewa").await.is_err());
    }
}
