//! Status Transition Engine
//!
//! Applies transitions against the data-driven flow tables. The entity
//! status update is the only step that must succeed; the transition log
//! append and the notification email are fire-and-forget, each isolated so
//! one failing does not affect the other or the caller's result.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use shared::models::{Order, Quote, StatusTransitionEvent, TransitionTrigger};
use shared::{ApiError, EntityKind, OrderStatus, QuoteStatus};

use crate::db::{OrderRepository, QuoteRepository, StoreError, TransitionRepository};
use crate::services::EmailService;

use super::flow::StatusFlows;

/// Transition errors
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Transition {from} -> {to} is not allowed for {kind}")]
    InvalidTransition {
        kind: EntityKind,
        from: String,
        to: String,
    },

    #[error("{kind} {id} is in status {actual}, expected {expected}")]
    StatusMismatch {
        kind: EntityKind,
        id: String,
        expected: String,
        actual: String,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<TransitionError> for ApiError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::InvalidTransition { .. } | TransitionError::StatusMismatch { .. } => {
                ApiError::invalid_transition(err.to_string())
            }
            TransitionError::NotFound { kind, id } => {
                ApiError::not_found(format!("{} {}", kind, id))
            }
            TransitionError::Storage(e) => e.into(),
        }
    }
}

/// Aggregate result of a bulk transition
#[derive(Debug, Default, Serialize)]
pub struct BulkTransitionReport {
    pub succeeded: Vec<String>,
    /// (id, reason) for every row that failed
    pub failed: Vec<(String, String)>,
}

impl BulkTransitionReport {
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }
}

#[derive(Clone)]
pub struct StatusEngine {
    flows: Arc<StatusFlows>,
    quotes: QuoteRepository,
    orders: OrderRepository,
    transitions: TransitionRepository,
    email: EmailService,
}

impl StatusEngine {
    pub fn new(
        flows: Arc<StatusFlows>,
        quotes: QuoteRepository,
        orders: OrderRepository,
        transitions: TransitionRepository,
        email: EmailService,
    ) -> Self {
        Self {
            flows,
            quotes,
            orders,
            transitions,
            email,
        }
    }

    pub fn flows(&self) -> &StatusFlows {
        &self.flows
    }

    /// Apply a quote transition
    pub async fn transition_quote(
        &self,
        id: &str,
        from: QuoteStatus,
        to: QuoteStatus,
        trigger: TransitionTrigger,
        metadata: Option<serde_json::Value>,
    ) -> Result<Quote, TransitionError> {
        self.check_allowed(EntityKind::Quote, from.as_str(), to.as_str())?;

        let quote = self
            .quotes
            .find_by_id(id)
            .await?
            .ok_or_else(|| TransitionError::NotFound {
                kind: EntityKind::Quote,
                id: id.to_string(),
            })?;
        if quote.status != from {
            return Err(TransitionError::StatusMismatch {
                kind: EntityKind::Quote,
                id: id.to_string(),
                expected: from.to_string(),
                actual: quote.status.to_string(),
            });
        }

        // The status update is the only step that must succeed
        let updated = self.quotes.set_status(id, to).await?;

        self.log_event(EntityKind::Quote, id, from.as_str(), to.as_str(), trigger, metadata)
            .await;
        self.notify(
            quote.customer_email.as_deref(),
            EntityKind::Quote,
            id,
            to.as_str(),
            trigger,
        )
        .await;

        Ok(updated)
    }

    /// Apply an order transition
    pub async fn transition_order(
        &self,
        id: &str,
        from: OrderStatus,
        to: OrderStatus,
        trigger: TransitionTrigger,
        metadata: Option<serde_json::Value>,
    ) -> Result<Order, TransitionError> {
        self.check_allowed(EntityKind::Order, from.as_str(), to.as_str())?;

        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| TransitionError::NotFound {
                kind: EntityKind::Order,
                id: id.to_string(),
            })?;
        if order.status != from {
            return Err(TransitionError::StatusMismatch {
                kind: EntityKind::Order,
                id: id.to_string(),
                expected: from.to_string(),
                actual: order.status.to_string(),
            });
        }

        let updated = self.orders.set_status(id, to).await?;

        self.log_event(EntityKind::Order, id, from.as_str(), to.as_str(), trigger, metadata)
            .await;
        // Order notifications go to the quote's customer
        let recipient = match self.quotes.find_by_id(&order.quote_id).await {
            Ok(Some(q)) => q.customer_email,
            _ => None,
        };
        self.notify(recipient.as_deref(), EntityKind::Order, id, to.as_str(), trigger)
            .await;

        Ok(updated)
    }

    /// Transition many quotes, catch-and-continue per row
    ///
    /// Each quote's current status is used as the from-status. One row
    /// failing (missing id, disallowed pair) leaves the rest processed.
    pub async fn bulk_transition_quotes(
        &self,
        ids: &[String],
        to: QuoteStatus,
        trigger: TransitionTrigger,
    ) -> BulkTransitionReport {
        let mut report = BulkTransitionReport::default();
        for id in ids {
            let from = match self.quotes.find_by_id(id).await {
                Ok(Some(q)) => q.status,
                Ok(None) => {
                    report
                        .failed
                        .push((id.clone(), format!("quote {} not found", id)));
                    continue;
                }
                Err(e) => {
                    report.failed.push((id.clone(), e.to_string()));
                    continue;
                }
            };
            match self.transition_quote(id, from, to, trigger, None).await {
                Ok(_) => report.succeeded.push(id.clone()),
                Err(e) => {
                    tracing::warn!(quote_id = %id, error = %e, "bulk transition row failed");
                    report.failed.push((id.clone(), e.to_string()));
                }
            }
        }
        tracing::info!(
            succeeded = report.success_count(),
            failed = report.failure_count(),
            "bulk transition finished"
        );
        report
    }

    fn check_allowed(
        &self,
        kind: EntityKind,
        from: &str,
        to: &str,
    ) -> Result<(), TransitionError> {
        if self.flows.for_kind(kind).can_transition(from, to) {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition {
                kind,
                from: from.to_string(),
                to: to.to_string(),
            })
        }
    }

    /// Append the transition event; failure is logged, never propagated
    async fn log_event(
        &self,
        kind: EntityKind,
        entity_id: &str,
        from: &str,
        to: &str,
        trigger: TransitionTrigger,
        metadata: Option<serde_json::Value>,
    ) {
        let event = StatusTransitionEvent {
            id: Uuid::new_v4().to_string(),
            entity_kind: kind,
            entity_id: entity_id.to_string(),
            from_status: from.to_string(),
            to_status: to.to_string(),
            trigger,
            metadata,
            created_at: Utc::now(),
        };
        if let Err(e) = self.transitions.append(event).await {
            tracing::warn!(
                entity_id,
                error = %e,
                "transition log append failed, status change stands"
            );
        }
    }

    /// Send the category email; failure is logged, never propagated
    async fn notify(
        &self,
        recipient: Option<&str>,
        kind: EntityKind,
        entity_id: &str,
        to_status: &str,
        trigger: TransitionTrigger,
    ) {
        let label = self
            .flows
            .for_kind(kind)
            .status(to_status)
            .map(|s| s.label)
            .unwrap_or(to_status);
        let subject = format!("Your {} is now {}", kind, label);
        let context = json!({
            "entity_kind": kind.as_str(),
            "entity_id": entity_id,
            "status": to_status,
            "status_label": label,
        });
        if let Err(e) = self
            .email
            .send_status_email(recipient, trigger.notification_category(), &subject, context)
            .await
        {
            tracing::warn!(
                entity_id,
                error = %e,
                "status email failed, status change stands"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{EmailSettingsRepository, MemoryStore};
    use crate::services::{EmailService, FunctionClient};
    use crate::utils::RetryPolicy;
    use shared::models::Quote;

    fn engine_with_store() -> (StatusEngine, MemoryStore) {
        let store = MemoryStore::with_seed_data();
        let functions = FunctionClient::new("http://localhost:0", "", RetryPolicy::no_retry());
        // Master switch off so tests never touch the network
        let email = EmailService::new(
            functions,
            EmailSettingsRepository::new(store.clone()),
            false,
        );
        let engine = StatusEngine::new(
            Arc::new(StatusFlows::standard()),
            QuoteRepository::new(store.clone()),
            OrderRepository::new(store.clone()),
            TransitionRepository::new(store.clone()),
            email,
        );
        (engine, store)
    }

    fn seed_quote(store: &MemoryStore, id: &str, status: QuoteStatus) -> Quote {
        let now = chrono::Utc::now();
        let quote = Quote {
            id: id.to_string(),
            status,
            origin_country: "US".into(),
            destination_country: "NP".into(),
            items: vec![],
            shipping_method: Default::default(),
            insurance_required: false,
            handling_fee_type: Default::default(),
            payment_gateway: None,
            order_discount: None,
            shipping_discount: None,
            calculation_data: None,
            customer_email: None,
            customer_currency: "NPR".into(),
            total_usd: 0.0,
            total_customer_currency: 0.0,
            share_token: format!("tok-{}", id),
            expires_at: now + chrono::Duration::days(7),
            created_at: now,
            updated_at: now,
        };
        store.quotes.insert(quote.id.clone(), quote.clone());
        quote
    }

    #[tokio::test]
    async fn test_transition_updates_status_and_logs_event() {
        let (engine, store) = engine_with_store();
        seed_quote(&store, "q1", QuoteStatus::Sent);

        let updated = engine
            .transition_quote(
                "q1",
                QuoteStatus::Sent,
                QuoteStatus::Approved,
                TransitionTrigger::Manual,
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.status, QuoteStatus::Approved);

        let events = TransitionRepository::new(store)
            .find_for_entity(EntityKind::Quote, "q1")
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].from_status, "sent");
        assert_eq!(events[0].to_status, "approved");
    }

    #[tokio::test]
    async fn test_disallowed_transition_is_rejected() {
        let (engine, store) = engine_with_store();
        seed_quote(&store, "q1", QuoteStatus::Pending);

        let err = engine
            .transition_quote(
                "q1",
                QuoteStatus::Pending,
                QuoteStatus::Paid,
                TransitionTrigger::Manual,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));

        // Rejection leaves the quote untouched
        let unchanged = store.quotes.get("q1").unwrap().clone();
        assert_eq!(unchanged.status, QuoteStatus::Pending);
    }

    #[tokio::test]
    async fn test_stale_from_status_is_a_mismatch() {
        let (engine, store) = engine_with_store();
        seed_quote(&store, "q1", QuoteStatus::Approved);

        let err = engine
            .transition_quote(
                "q1",
                QuoteStatus::Sent,
                QuoteStatus::Approved,
                TransitionTrigger::Manual,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TransitionError::StatusMismatch { .. }));
    }

    #[tokio::test]
    async fn test_bulk_transition_continues_past_failures() {
        let (engine, store) = engine_with_store();
        seed_quote(&store, "q1", QuoteStatus::Calculated);
        seed_quote(&store, "q2", QuoteStatus::Paid); // terminal, cannot move
        seed_quote(&store, "q3", QuoteStatus::Calculated);

        let ids = vec![
            "q1".to_string(),
            "q2".to_string(),
            "missing".to_string(),
            "q3".to_string(),
        ];
        let report = engine
            .bulk_transition_quotes(&ids, QuoteStatus::Sent, TransitionTrigger::QuoteSent)
            .await;

        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failure_count(), 2);
        assert_eq!(store.quotes.get("q1").unwrap().status, QuoteStatus::Sent);
        assert_eq!(store.quotes.get("q3").unwrap().status, QuoteStatus::Sent);
        assert_eq!(store.quotes.get("q2").unwrap().status, QuoteStatus::Paid);
    }

    #[tokio::test]
    async fn test_unreachable_email_endpoint_does_not_fail_transition() {
        let store = MemoryStore::with_seed_data();
        let functions = FunctionClient::new("http://127.0.0.1:1", "", RetryPolicy::no_retry());
        // Email active, endpoint unreachable: send fails, transition stands
        let email = EmailService::new(
            functions,
            EmailSettingsRepository::new(store.clone()),
            true,
        );
        let engine = StatusEngine::new(
            Arc::new(StatusFlows::standard()),
            QuoteRepository::new(store.clone()),
            OrderRepository::new(store.clone()),
            TransitionRepository::new(store.clone()),
            email,
        );
        let mut quote = seed_quote(&store, "q1", QuoteStatus::Sent);
        quote.customer_email = Some("asha@example.com".into());
        store.quotes.insert(quote.id.clone(), quote);

        let updated = engine
            .transition_quote(
                "q1",
                QuoteStatus::Sent,
                QuoteStatus::Approved,
                TransitionTrigger::Manual,
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.status, QuoteStatus::Approved);

        let events = TransitionRepository::new(store)
            .find_for_entity(EntityKind::Quote, "q1")
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_order_transition_follows_order_flow() {
        let (engine, store) = engine_with_store();
        seed_quote(&store, "q1", QuoteStatus::Paid);
        let now = chrono::Utc::now();
        let order = shared::models::Order {
            id: "o1".into(),
            quote_id: "q1".into(),
            status: OrderStatus::Ordered,
            destination_country: "NP".into(),
            paid_breakdown: shared::models::QuoteBreakdown::default(),
            paid_amount_usd: 29.38,
            customer_currency: "NPR".into(),
            tracking_number: None,
            created_at: now,
            updated_at: now,
        };
        store.orders.insert(order.id.clone(), order);

        let updated = engine
            .transition_order(
                "o1",
                OrderStatus::Ordered,
                OrderStatus::Shipped,
                TransitionTrigger::OrderShipped,
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);

        let err = engine
            .transition_order(
                "o1",
                OrderStatus::Shipped,
                OrderStatus::Completed,
                TransitionTrigger::Manual,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    }
}
