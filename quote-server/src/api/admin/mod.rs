//! Admin API module
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /api/admin/stats | GET | Funnel and revenue statistics |
//! | /api/admin/email-settings | GET | Current notification settings |
//! | /api/admin/email-settings | PUT | Replace notification settings |

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/stats", get(handler::stats))
        .route(
            "/email-settings",
            get(handler::get_email_settings).put(handler::update_email_settings),
        )
}
