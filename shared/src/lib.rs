//! Shared types for the quote-to-order platform
//!
//! Common types used across crates: error types, the unified API response
//! envelope, and the persisted data model (quotes, orders, countries,
//! payment gateways, delivery addresses, status transition events).

pub mod error;
pub mod models;
pub mod response;
pub mod status;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use response::ApiResponse;
pub use status::{EntityKind, OrderStatus, QuoteStatus};
