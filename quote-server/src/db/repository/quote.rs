//! Quote Repository

use chrono::{DateTime, Utc};

use shared::models::Quote;
use shared::QuoteStatus;

use super::super::{store::MemoryStore, StoreError, StoreResult};

#[derive(Clone)]
pub struct QuoteRepository {
    store: MemoryStore,
}

impl QuoteRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Insert a new quote
    pub async fn create(&self, quote: Quote) -> StoreResult<Quote> {
        if self.store.quotes.contains_key(&quote.id) {
            return Err(StoreError::Duplicate(format!("quote {}", quote.id)));
        }
        self.store.quotes.insert(quote.id.clone(), quote.clone());
        Ok(quote)
    }

    /// Find quote by id
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Quote>> {
        Ok(self.store.quotes.get(id).map(|q| q.clone()))
    }

    /// Find quote by customer-facing share token
    pub async fn find_by_share_token(&self, token: &str) -> StoreResult<Option<Quote>> {
        Ok(self
            .store
            .quotes
            .iter()
            .find(|q| q.share_token == token)
            .map(|q| q.clone()))
    }

    /// List quotes, newest first, optionally filtered by status
    pub async fn find_all(&self, status: Option<QuoteStatus>) -> StoreResult<Vec<Quote>> {
        let mut quotes: Vec<Quote> = self
            .store
            .quotes
            .iter()
            .filter(|q| status.is_none_or(|s| q.status == s))
            .map(|q| q.clone())
            .collect();
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quotes)
    }

    /// Replace a quote row
    pub async fn update(&self, quote: Quote) -> StoreResult<Quote> {
        if !self.store.quotes.contains_key(&quote.id) {
            return Err(StoreError::NotFound(format!("quote {}", quote.id)));
        }
        self.store.quotes.insert(quote.id.clone(), quote.clone());
        Ok(quote)
    }

    /// Update only the status column (single-row atomic)
    pub async fn set_status(&self, id: &str, status: QuoteStatus) -> StoreResult<Quote> {
        let mut entry = self
            .store
            .quotes
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("quote {}", id)))?;
        entry.status = status;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// Quotes past their expiry in a state the expiry sweep may touch
    pub async fn find_expired(&self, now: DateTime<Utc>) -> StoreResult<Vec<Quote>> {
        let expirable = [
            QuoteStatus::Pending,
            QuoteStatus::Calculated,
            QuoteStatus::Sent,
            QuoteStatus::Approved,
        ];
        Ok(self
            .store
            .quotes
            .iter()
            .filter(|q| q.expires_at <= now && expirable.contains(&q.status))
            .map(|q| q.clone())
            .collect())
    }
}
