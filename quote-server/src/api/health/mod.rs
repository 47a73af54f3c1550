//! Health check routes
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /health | GET | Simple health check |
//! | /health/detailed | GET | Component checks |

use std::time::SystemTime;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
}

#[derive(Serialize)]
pub struct DetailedHealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
    checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    store: CheckResult,
    exchange_rates: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl CheckResult {
    fn ok(detail: impl Into<String>) -> Self {
        Self {
            status: "ok",
            detail: Some(detail.into()),
        }
    }

    fn error(detail: impl Into<String>) -> Self {
        Self {
            status: "error",
            detail: Some(detail.into()),
        }
    }
}

static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

/// Record the server start. Called once during startup so uptime counts
/// from there rather than from the first detailed-health request.
pub fn record_start() {
    START_TIME.get_or_init(SystemTime::now);
}

fn uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
    })
}

pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let store_check = match state.countries.find_all().await {
        Ok(countries) => CheckResult::ok(format!("{} countries configured", countries.len())),
        Err(e) => CheckResult::error(format!("store error: {}", e)),
    };
    let rates_check = if state.rates.is_empty() {
        CheckResult::error("no exchange rates cached")
    } else {
        CheckResult::ok(format!("{} currencies cached", state.rates.len()))
    };

    let all_ok = store_check.status == "ok" && rates_check.status == "ok";
    Json(DetailedHealthResponse {
        status: if all_ok { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: uptime_seconds(),
        checks: HealthChecks {
            store: store_check,
            exchange_rates: rates_check,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_start_pins_the_uptime_origin() {
        record_start();
        let first = *START_TIME.get().expect("start recorded");
        // A second call (or a later health request) never moves the origin
        record_start();
        assert_eq!(*START_TIME.get().expect("start recorded"), first);
        let _ = uptime_seconds();
        assert_eq!(*START_TIME.get().expect("start recorded"), first);
    }
}
