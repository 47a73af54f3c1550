//! Country reference API module
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /api/countries | GET | All configured countries |
//! | /api/countries/{code} | GET | One country row |
//! | /api/countries/hsn | GET | HSN classification rates |

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/countries", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/hsn", get(handler::list_hsn))
        .route("/{code}", get(handler::get_by_code))
}
