//! Payment Gateway Reference Repository

use shared::models::PaymentGateway;

use super::super::{store::MemoryStore, StoreResult};

#[derive(Clone)]
pub struct GatewayRepository {
    store: MemoryStore,
}

impl GatewayRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// All active gateways, sorted by id
    pub async fn find_all_active(&self) -> StoreResult<Vec<PaymentGateway>> {
        let mut gateways: Vec<PaymentGateway> = self
            .store
            .gateways
            .iter()
            .filter(|g| g.is_active)
            .map(|g| g.clone())
            .collect();
        gateways.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(gateways)
    }

    /// Find gateway by id
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<PaymentGateway>> {
        Ok(self.store.gateways.get(id).map(|g| g.clone()))
    }
}
