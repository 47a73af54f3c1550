//! Order Repository

use chrono::Utc;

use shared::models::Order;
use shared::OrderStatus;

use super::super::{store::MemoryStore, StoreError, StoreResult};

#[derive(Clone)]
pub struct OrderRepository {
    store: MemoryStore,
}

impl OrderRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Insert a new order
    pub async fn create(&self, order: Order) -> StoreResult<Order> {
        if self.store.orders.contains_key(&order.id) {
            return Err(StoreError::Duplicate(format!("order {}", order.id)));
        }
        self.store.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Order>> {
        Ok(self.store.orders.get(id).map(|o| o.clone()))
    }

    /// Find the order created from a quote, if any
    pub async fn find_by_quote(&self, quote_id: &str) -> StoreResult<Option<Order>> {
        Ok(self
            .store
            .orders
            .iter()
            .find(|o| o.quote_id == quote_id)
            .map(|o| o.clone()))
    }

    /// List orders, newest first, optionally filtered by status
    pub async fn find_all(&self, status: Option<OrderStatus>) -> StoreResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .store
            .orders
            .iter()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .map(|o| o.clone())
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Update only the status column (single-row atomic)
    pub async fn set_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let mut entry = self
            .store
            .orders
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("order {}", id)))?;
        entry.status = status;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// Attach a tracking number
    pub async fn set_tracking(&self, id: &str, tracking: &str) -> StoreResult<Order> {
        let mut entry = self
            .store
            .orders
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("order {}", id)))?;
        entry.tracking_number = Some(tracking.to_string());
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }
}
