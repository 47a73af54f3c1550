//! Checkout API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use shared::models::{Order, PaymentGateway};

use crate::core::ServerState;
use crate::services::checkout::{PaymentSession, PaymentWebhook};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct PayRequest {
    pub gateway_id: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub processed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

/// GET /api/checkout/gateways/:country
pub async fn gateways(
    State(state): State<ServerState>,
    Path(country): Path<String>,
) -> AppResult<Json<Vec<PaymentGateway>>> {
    let gateways = state.checkout.available_gateways(&country).await?;
    Ok(Json(gateways))
}

/// POST /api/checkout/:quote_id/pay
pub async fn pay(
    State(state): State<ServerState>,
    Path(quote_id): Path<String>,
    Json(payload): Json<PayRequest>,
) -> AppResult<Json<PaymentSession>> {
    let session = state
        .checkout
        .create_payment(&quote_id, &payload.gateway_id)
        .await?;
    Ok(Json(session))
}

/// POST /api/checkout/webhook - called back by the payment function
pub async fn webhook(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentWebhook>,
) -> AppResult<Json<WebhookResponse>> {
    let order = state.checkout.handle_webhook(payload).await?;
    Ok(Json(WebhookResponse {
        processed: true,
        order,
    }))
}
