//! Delivery Address Repository

use shared::models::{DeliveryAddress, DeliveryAddressCreate};
use uuid::Uuid;

use super::super::{store::MemoryStore, StoreError, StoreResult};

#[derive(Clone)]
pub struct AddressRepository {
    store: MemoryStore,
}

impl AddressRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Insert a new address; a new default clears the user's previous one
    pub async fn create(&self, data: DeliveryAddressCreate) -> StoreResult<DeliveryAddress> {
        if data.is_default {
            self.clear_default(&data.user_id);
        }
        let address = DeliveryAddress {
            id: Uuid::new_v4().to_string(),
            user_id: data.user_id,
            recipient_name: data.recipient_name,
            phone: data.phone,
            country: data.country.to_uppercase(),
            line1: data.line1,
            line2: data.line2,
            city: data.city,
            postal_code: data.postal_code,
            province: data.province,
            district: data.district,
            municipality: data.municipality,
            ward: data.ward,
            is_default: data.is_default,
        };
        self.store
            .addresses
            .insert(address.id.clone(), address.clone());
        Ok(address)
    }

    /// Find address by id
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<DeliveryAddress>> {
        Ok(self.store.addresses.get(id).map(|a| a.clone()))
    }

    /// Addresses belonging to a user, default first
    pub async fn find_by_user(&self, user_id: &str) -> StoreResult<Vec<DeliveryAddress>> {
        let mut addresses: Vec<DeliveryAddress> = self
            .store
            .addresses
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| a.clone())
            .collect();
        addresses.sort_by(|a, b| b.is_default.cmp(&a.is_default).then(a.id.cmp(&b.id)));
        Ok(addresses)
    }

    /// Delete an address
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        match self.store.addresses.remove(id) {
            Some(_) => Ok(true),
            None => Err(StoreError::NotFound(format!("address {}", id))),
        }
    }

    fn clear_default(&self, user_id: &str) {
        for mut entry in self.store.addresses.iter_mut() {
            if entry.user_id == user_id && entry.is_default {
                entry.is_default = false;
            }
        }
    }
}
