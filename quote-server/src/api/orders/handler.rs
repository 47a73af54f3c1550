//! Order API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use shared::models::{Order, StatusTransitionEvent, TransitionTrigger};
use shared::{EntityKind, OrderStatus};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub to: OrderStatus,
    #[serde(default)]
    pub trigger: Option<TransitionTrigger>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct TrackingRequest {
    pub tracking_number: String,
}

/// GET /api/orders - list orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.find_all(query.status).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("order {}", id)))?;
    Ok(Json(order))
}

/// POST /api/orders/:id/transition
pub async fn transition(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransitionRequest>,
) -> AppResult<Json<Order>> {
    let current = state
        .orders
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("order {}", id)))?;
    let order = state
        .engine
        .transition_order(
            &id,
            current.status,
            payload.to,
            payload.trigger.unwrap_or(TransitionTrigger::Manual),
            payload.metadata,
        )
        .await?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/tracking
pub async fn set_tracking(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TrackingRequest>,
) -> AppResult<Json<Order>> {
    if payload.tracking_number.trim().is_empty() {
        return Err(AppError::validation("tracking_number must not be empty"));
    }
    let order = state
        .orders
        .set_tracking(&id, payload.tracking_number.trim())
        .await?;
    Ok(Json(order))
}

/// GET /api/orders/:id/history - transition log, oldest first
pub async fn history(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<StatusTransitionEvent>>> {
    let events = state
        .transitions
        .find_for_entity(EntityKind::Order, &id)
        .await?;
    Ok(Json(events))
}
