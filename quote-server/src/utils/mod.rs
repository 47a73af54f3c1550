//! Utility module
//!
//! - [`logger`] - tracing setup
//! - [`retry`] - shared retry/fallback policy
//! - [`validation`] - country-specific address validation

pub mod logger;
pub mod retry;
pub mod validation;

// Re-export unified error types from shared
pub use shared::error::{ApiError as AppError, ApiResult as AppResult};
pub use retry::RetryPolicy;
