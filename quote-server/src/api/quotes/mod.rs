//! Quote API module
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /api/quotes | POST | Create a quote |
//! | /api/quotes | GET | List quotes, optional ?status= filter |
//! | /api/quotes/{id} | GET | Fetch one quote |
//! | /api/quotes/{id} | PUT | Update and recalculate |
//! | /api/quotes/{id}/transition | POST | Apply a status transition |
//! | /api/quotes/{id}/history | GET | Transition log for the quote |
//! | /api/quotes/bulk-transition | POST | Transition many quotes |
//! | /api/quotes/shared/{token} | GET | Customer-facing share-link lookup |

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/quotes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/bulk-transition", post(handler::bulk_transition))
        .route("/shared/{token}", get(handler::get_by_share_token))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/transition", post(handler::transition))
        .route("/{id}/history", get(handler::history))
}
