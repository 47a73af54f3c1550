//! Status Transition Event Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::EntityKind;

/// What caused a status transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionTrigger {
    PaymentReceived,
    QuoteSent,
    OrderShipped,
    QuoteExpired,
    Manual,
    AutoCalculation,
}

impl TransitionTrigger {
    /// Notification category key for email settings lookup
    pub fn notification_category(&self) -> &'static str {
        match self {
            Self::PaymentReceived => "payment_received",
            Self::QuoteSent => "quote_sent",
            Self::OrderShipped => "order_shipped",
            Self::QuoteExpired => "quote_expired",
            Self::Manual => "manual",
            Self::AutoCalculation => "auto_calculation",
        }
    }
}

/// Append-only status transition log row - never mutated after insert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusTransitionEvent {
    pub id: String,
    pub entity_kind: EntityKind,
    /// Quote or order id
    pub entity_id: String,
    pub from_status: String,
    pub to_status: String,
    pub trigger: TransitionTrigger,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
