use std::sync::Arc;

use crate::core::Config;
use crate::currency::{CurrencyService, RateCache};
use crate::db::{
    AddressRepository, CountryRepository, EmailSettingsRepository, GatewayRepository,
    MemoryStore, OrderRepository, PaymentRepository, QuoteRepository, TransitionRepository,
};
use crate::services::{CheckoutService, EmailService, FunctionClient, QuoteService};
use crate::status::{StatusEngine, StatusFlows};
use crate::utils::RetryPolicy;

/// Server state - shared handle to every service
///
/// Cloning is shallow; every field is either a cheap handle over the shared
/// store or an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// Shared in-memory store
    pub store: MemoryStore,
    /// Exchange-rate cache, refreshed by the background task
    pub rates: RateCache,
    // Repositories
    pub quotes: QuoteRepository,
    pub orders: OrderRepository,
    pub payments: PaymentRepository,
    pub addresses: AddressRepository,
    pub countries: CountryRepository,
    pub gateways: GatewayRepository,
    pub transitions: TransitionRepository,
    pub email_settings: EmailSettingsRepository,
    // Services
    pub currency: CurrencyService,
    pub engine: StatusEngine,
    pub email: EmailService,
    pub quote_service: QuoteService,
    pub checkout: CheckoutService,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// Order matters only in that services are layered over repositories:
    /// 1. Store with seed data, repositories over it
    /// 2. Rate cache seeded from the country table
    /// 3. Function client, email, transition engine
    /// 4. Quote and checkout services over the engine
    pub async fn initialize(config: &Config) -> Self {
        let store = MemoryStore::with_seed_data();

        let quotes = QuoteRepository::new(store.clone());
        let orders = OrderRepository::new(store.clone());
        let payments = PaymentRepository::new(store.clone());
        let addresses = AddressRepository::new(store.clone());
        let countries = CountryRepository::new(store.clone());
        let gateways = GatewayRepository::new(store.clone());
        let transitions = TransitionRepository::new(store.clone());
        let email_settings = EmailSettingsRepository::new(store.clone());

        let rates = RateCache::new();
        rates.seed(
            store
                .countries
                .iter()
                .map(|c| (c.currency.clone(), c.rate_from_usd)),
        );
        let currency = CurrencyService::new(rates.clone(), countries.clone());

        let functions = FunctionClient::new(
            config.functions_base_url.clone(),
            config.functions_token.clone(),
            RetryPolicy::default(),
        );
        let email = EmailService::new(
            functions.clone(),
            email_settings.clone(),
            config.email_enabled,
        );

        let flows = Arc::new(StatusFlows::standard());
        let engine = StatusEngine::new(
            flows,
            quotes.clone(),
            orders.clone(),
            transitions.clone(),
            email.clone(),
        );

        let quote_service = QuoteService::new(
            quotes.clone(),
            countries.clone(),
            gateways.clone(),
            currency.clone(),
            engine.clone(),
            config.quote_ttl_days,
            config.default_insurance_rate,
        );
        let checkout = CheckoutService::new(
            quotes.clone(),
            orders.clone(),
            payments.clone(),
            gateways.clone(),
            countries.clone(),
            currency.clone(),
            quote_service.clone(),
            engine.clone(),
            functions,
        );

        Self {
            config: config.clone(),
            store,
            rates,
            quotes,
            orders,
            payments,
            addresses,
            countries,
            gateways,
            transitions,
            email_settings,
            currency,
            engine,
            email,
            quote_service,
            checkout,
        }
    }
}
