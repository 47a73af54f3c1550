//! Order API module
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /api/orders | GET | List orders, optional ?status= filter |
//! | /api/orders/{id} | GET | Fetch one order |
//! | /api/orders/{id}/transition | POST | Apply a status transition |
//! | /api/orders/{id}/tracking | PUT | Attach a tracking number |
//! | /api/orders/{id}/history | GET | Transition log for the order |

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/transition", post(handler::transition))
        .route("/{id}/tracking", put(handler::set_tracking))
        .route("/{id}/history", get(handler::history))
}
