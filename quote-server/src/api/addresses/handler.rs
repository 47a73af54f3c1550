//! Delivery address API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use shared::models::{DeliveryAddress, DeliveryAddressCreate};

use crate::core::ServerState;
use crate::utils::validation::validate_address_shape;
use crate::utils::{AppError, AppResult};

/// POST /api/addresses - field checks first, then country-specific shape
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DeliveryAddressCreate>,
) -> AppResult<Json<DeliveryAddress>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    validate_address_shape(&payload)?;
    let address = state.addresses.create(payload).await?;
    Ok(Json(address))
}

/// GET /api/addresses/user/:user_id
pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<DeliveryAddress>>> {
    let addresses = state.addresses.find_by_user(&user_id).await?;
    Ok(Json(addresses))
}

/// DELETE /api/addresses/:id
pub async fn delete_address(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.addresses.delete(&id).await?;
    Ok(Json(deleted))
}
