//! Payment Transaction Repository

use shared::models::{PaymentStatus, PaymentTransaction};

use super::super::{store::MemoryStore, StoreError, StoreResult};

#[derive(Clone)]
pub struct PaymentRepository {
    store: MemoryStore,
}

impl PaymentRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Insert a new transaction row
    pub async fn create(&self, txn: PaymentTransaction) -> StoreResult<PaymentTransaction> {
        if self.store.payments.contains_key(&txn.id) {
            return Err(StoreError::Duplicate(format!("payment {}", txn.id)));
        }
        self.store.payments.insert(txn.id.clone(), txn.clone());
        Ok(txn)
    }

    /// Find transaction by id
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<PaymentTransaction>> {
        Ok(self.store.payments.get(id).map(|p| p.clone()))
    }

    /// Transactions recorded for a quote
    pub async fn find_by_quote(&self, quote_id: &str) -> StoreResult<Vec<PaymentTransaction>> {
        Ok(self
            .store
            .payments
            .iter()
            .filter(|p| p.quote_id == quote_id)
            .map(|p| p.clone())
            .collect())
    }

    /// Update transaction status
    pub async fn set_status(&self, id: &str, status: PaymentStatus) -> StoreResult<PaymentTransaction> {
        let mut entry = self
            .store
            .payments
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("payment {}", id)))?;
        entry.status = status;
        Ok(entry.clone())
    }
}
