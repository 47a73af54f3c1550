//! In-memory store
//!
//! DashMap-backed tables shared across repositories. Single-row operations
//! are atomic per entry; there is no cross-row transaction, so bulk
//! operations iterate row-by-row and tolerate partial failure.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;

use shared::models::{
    Country, DeliveryAddress, EmailSettings, HsnRate, Order, PaymentGateway, PaymentTransaction,
    Quote, StatusTransitionEvent,
};

/// Shared in-process store
///
/// Cloning is cheap; all tables are behind `Arc`.
#[derive(Clone)]
pub struct MemoryStore {
    pub quotes: Arc<DashMap<String, Quote>>,
    pub orders: Arc<DashMap<String, Order>>,
    pub addresses: Arc<DashMap<String, DeliveryAddress>>,
    pub payments: Arc<DashMap<String, PaymentTransaction>>,
    /// Reference data keyed by ISO country code
    pub countries: Arc<DashMap<String, Country>>,
    /// Reference data keyed by HSN code
    pub hsn_rates: Arc<DashMap<String, HsnRate>>,
    /// Reference data keyed by gateway id
    pub gateways: Arc<DashMap<String, PaymentGateway>>,
    /// Append-only transition log, insertion order preserved
    pub transitions: Arc<RwLock<Vec<StatusTransitionEvent>>>,
    pub email_settings: Arc<RwLock<EmailSettings>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            quotes: Arc::new(DashMap::new()),
            orders: Arc::new(DashMap::new()),
            addresses: Arc::new(DashMap::new()),
            payments: Arc::new(DashMap::new()),
            countries: Arc::new(DashMap::new()),
            hsn_rates: Arc::new(DashMap::new()),
            gateways: Arc::new(DashMap::new()),
            transitions: Arc::new(RwLock::new(Vec::new())),
            email_settings: Arc::new(RwLock::new(EmailSettings::default())),
        }
    }

    /// Create a store pre-loaded with the embedded reference data
    pub fn with_seed_data() -> Self {
        let store = Self::new();
        super::seed::load_reference_data(&store);
        store
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
