//! Email Settings Repository

use shared::models::EmailSettings;

use super::super::{store::MemoryStore, StoreResult};

#[derive(Clone)]
pub struct EmailSettingsRepository {
    store: MemoryStore,
}

impl EmailSettingsRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Current settings snapshot
    pub async fn get(&self) -> StoreResult<EmailSettings> {
        Ok(self.store.email_settings.read().await.clone())
    }

    /// Replace the settings
    pub async fn update(&self, settings: EmailSettings) -> StoreResult<EmailSettings> {
        let mut guard = self.store.email_settings.write().await;
        *guard = settings.clone();
        Ok(settings)
    }
}
