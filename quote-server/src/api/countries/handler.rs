//! Country reference API handlers

use axum::{
    extract::{Path, State},
    Json,
};

use shared::models::{Country, HsnRate};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/countries
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Country>>> {
    let countries = state.countries.find_all().await?;
    Ok(Json(countries))
}

/// GET /api/countries/:code
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Country>> {
    let country = state
        .countries
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("country {}", code)))?;
    Ok(Json(country))
}

/// GET /api/countries/hsn
pub async fn list_hsn(State(state): State<ServerState>) -> AppResult<Json<Vec<HsnRate>>> {
    let rates = state.countries.find_all_hsn().await?;
    Ok(Json(rates))
}
