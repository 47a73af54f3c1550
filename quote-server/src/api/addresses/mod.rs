//! Delivery address API module
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /api/addresses | POST | Create an address |
//! | /api/addresses/user/{user_id} | GET | User's addresses, default first |
//! | /api/addresses/{id} | DELETE | Delete an address |

mod handler;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/addresses", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/user/{user_id}", get(handler::list_for_user))
        .route("/{id}", delete(handler::delete_address))
}
