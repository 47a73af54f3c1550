//! Checkout API module
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /api/checkout/gateways/{country} | GET | Gateways serving a destination |
//! | /api/checkout/{quote_id}/pay | POST | Create a payment for an approved quote |
//! | /api/checkout/webhook | POST | Gateway payment result callback |

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/checkout", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/gateways/{country}", get(handler::gateways))
        .route("/webhook", post(handler::webhook))
        .route("/{quote_id}/pay", post(handler::pay))
}
