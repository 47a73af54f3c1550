//! Status Transition Log Repository
//!
//! Append-only. Rows are never updated or deleted.

use shared::models::StatusTransitionEvent;
use shared::EntityKind;

use super::super::{store::MemoryStore, StoreResult};

#[derive(Clone)]
pub struct TransitionRepository {
    store: MemoryStore,
}

impl TransitionRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Append a transition event
    pub async fn append(&self, event: StatusTransitionEvent) -> StoreResult<()> {
        self.store.transitions.write().await.push(event);
        Ok(())
    }

    /// All events for one entity, oldest first
    pub async fn find_for_entity(
        &self,
        kind: EntityKind,
        entity_id: &str,
    ) -> StoreResult<Vec<StatusTransitionEvent>> {
        Ok(self
            .store
            .transitions
            .read()
            .await
            .iter()
            .filter(|e| e.entity_kind == kind && e.entity_id == entity_id)
            .cloned()
            .collect())
    }

    /// Total number of logged events
    pub async fn count(&self) -> StoreResult<usize> {
        Ok(self.store.transitions.read().await.len())
    }
}
