//! Quote API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use shared::models::{Quote, QuoteCreate, QuoteUpdate, StatusTransitionEvent, TransitionTrigger};
use shared::{EntityKind, QuoteStatus};

use crate::core::ServerState;
use crate::status::BulkTransitionReport;
use crate::utils::validation::validate_discounts;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<QuoteStatus>,
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub to: QuoteStatus,
    #[serde(default)]
    pub trigger: Option<TransitionTrigger>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct BulkTransitionRequest {
    pub ids: Vec<String>,
    pub to: QuoteStatus,
    #[serde(default)]
    pub trigger: Option<TransitionTrigger>,
}

/// POST /api/quotes - create a quote and calculate it
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<QuoteCreate>,
) -> AppResult<Json<Quote>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let quote = state.quote_service.create(payload).await?;
    Ok(Json(quote))
}

/// GET /api/quotes - list quotes, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Quote>>> {
    let quotes = state.quotes.find_all(query.status).await?;
    Ok(Json(quotes))
}

/// GET /api/quotes/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Quote>> {
    let quote = state
        .quotes
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("quote {}", id)))?;
    Ok(Json(quote))
}

/// GET /api/quotes/shared/:token - customer-facing lookup, no admin data
pub async fn get_by_share_token(
    State(state): State<ServerState>,
    Path(token): Path<String>,
) -> AppResult<Json<Quote>> {
    let quote = state
        .quotes
        .find_by_share_token(&token)
        .await?
        .ok_or_else(|| AppError::not_found("shared quote".to_string()))?;
    Ok(Json(quote))
}

/// PUT /api/quotes/:id - apply changes and recalculate
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<QuoteUpdate>,
) -> AppResult<Json<Quote>> {
    if let Some(items) = &payload.items {
        for item in items {
            item.validate()
                .map_err(|e| AppError::validation(e.to_string()))?;
        }
    }
    validate_discounts(&payload)?;
    let quote = state.quote_service.update(&id, payload).await?;
    Ok(Json(quote))
}

/// POST /api/quotes/:id/transition
///
/// The quote's current status is the from-status; the engine re-verifies
/// it so a concurrent change surfaces as a conflict, not a silent skip.
pub async fn transition(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransitionRequest>,
) -> AppResult<Json<Quote>> {
    let current = state
        .quotes
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("quote {}", id)))?;
    let quote = state
        .engine
        .transition_quote(
            &id,
            current.status,
            payload.to,
            payload.trigger.unwrap_or(TransitionTrigger::Manual),
            payload.metadata,
        )
        .await?;
    Ok(Json(quote))
}

/// POST /api/quotes/bulk-transition - catch-and-continue per row
pub async fn bulk_transition(
    State(state): State<ServerState>,
    Json(payload): Json<BulkTransitionRequest>,
) -> AppResult<Json<BulkTransitionReport>> {
    let report = state
        .engine
        .bulk_transition_quotes(
            &payload.ids,
            payload.to,
            payload.trigger.unwrap_or(TransitionTrigger::Manual),
        )
        .await;
    Ok(Json(report))
}

/// GET /api/quotes/:id/history - transition log, oldest first
pub async fn history(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<StatusTransitionEvent>>> {
    let events = state
        .transitions
        .find_for_entity(EntityKind::Quote, &id)
        .await?;
    Ok(Json(events))
}
