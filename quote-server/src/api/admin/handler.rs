//! Admin API handlers
//!
//! Reporting reads the same status metadata the transition engine uses, so
//! "counts as order" and "successful" always agree with the flow tables.

use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::Serialize;

use shared::models::EmailSettings;
use shared::EntityKind;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_quotes: usize,
    /// Quote count per status name
    pub quotes_by_status: HashMap<String, usize>,
    /// Quotes whose status counts as a placed order
    pub quotes_counting_as_orders: usize,
    /// Share of quotes that became orders, 0.0 when there are no quotes
    pub conversion_rate: f64,
    /// Sum of calculated quote totals, USD
    pub quoted_value_usd: f64,
    pub total_orders: usize,
    pub orders_by_status: HashMap<String, usize>,
    /// Sum of paid amounts across all orders, USD
    pub revenue_usd: f64,
    /// Total transition log rows
    pub transition_events: usize,
}

/// GET /api/admin/stats
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<AdminStats>> {
    let quotes = state.quotes.find_all(None).await?;
    let orders = state.orders.find_all(None).await?;
    let transition_events = state.transitions.count().await?;

    let quote_flow = state.engine.flows().for_kind(EntityKind::Quote);

    let mut quotes_by_status: HashMap<String, usize> = HashMap::new();
    let mut quotes_counting_as_orders = 0;
    let mut quoted_value_usd = 0.0;
    for quote in &quotes {
        let name = quote.status.as_str();
        *quotes_by_status.entry(name.to_string()).or_insert(0) += 1;
        if quote_flow.status(name).is_some_and(|s| s.counts_as_order) {
            quotes_counting_as_orders += 1;
        }
        quoted_value_usd += quote.total_usd;
    }
    let conversion_rate = if quotes.is_empty() {
        0.0
    } else {
        quotes_counting_as_orders as f64 / quotes.len() as f64
    };

    let mut orders_by_status: HashMap<String, usize> = HashMap::new();
    let mut revenue_usd = 0.0;
    for order in &orders {
        *orders_by_status
            .entry(order.status.as_str().to_string())
            .or_insert(0) += 1;
        revenue_usd += order.paid_amount_usd;
    }

    Ok(Json(AdminStats {
        total_quotes: quotes.len(),
        quotes_by_status,
        quotes_counting_as_orders,
        conversion_rate,
        quoted_value_usd,
        total_orders: orders.len(),
        orders_by_status,
        revenue_usd,
        transition_events,
    }))
}

/// GET /api/admin/email-settings
pub async fn get_email_settings(
    State(state): State<ServerState>,
) -> AppResult<Json<EmailSettings>> {
    let settings = state.email_settings.get().await?;
    Ok(Json(settings))
}

/// PUT /api/admin/email-settings
pub async fn update_email_settings(
    State(state): State<ServerState>,
    Json(payload): Json<EmailSettings>,
) -> AppResult<Json<EmailSettings>> {
    let settings = state.email_settings.update(payload).await?;
    Ok(Json(settings))
}
