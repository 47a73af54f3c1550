//! Error types for the shared crate
//!
//! Standardized error types used across the whole platform

use crate::response::ApiResponse;
use http::{Response, StatusCode};
use thiserror::Error;

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Success
    Success,
    /// Validation error (400)
    Validation,
    /// Resource not found (404)
    NotFound,
    /// Resource already exists (409)
    Conflict,
    /// Business rule violation (422)
    BusinessRule,
    /// Status transition not in the allow-list (422)
    InvalidTransition,
    /// Internal server error (500)
    Internal,
    /// Storage error (500)
    Storage,
    /// Invalid request (400)
    Invalid,
}

impl ApiErrorCode {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::BusinessRule => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidTransition => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Invalid => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::Conflict => "E0004",
            Self::BusinessRule => "E0005",
            Self::InvalidTransition => "E0007",
            Self::Internal => "E9001",
            Self::Storage => "E9002",
            Self::Invalid => "E0006",
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unified error type for the platform
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation error
    #[error("{message}")]
    Validation { message: String },

    /// Resource not found
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Resource already exists
    #[error("Resource already exists: {resource}")]
    Conflict { resource: String },

    /// Business rule violation
    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    /// Status transition rejected by the flow allow-list
    #[error("Invalid transition: {message}")]
    InvalidTransition { message: String },

    /// Storage error
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Internal server error
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Invalid request
    #[error("Invalid request: {message}")]
    Invalid { message: String },
}

impl ApiError {
    // ========== Convenient constructors ==========

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage { message: message.into() }
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a Conflict error
    pub fn conflict(resource: impl Into<String>) -> Self {
        Self::Conflict { resource: resource.into() }
    }

    /// Create an Invalid error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid { message: message.into() }
    }

    /// Create a BusinessRule error
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule { message: message.into() }
    }

    /// Create an InvalidTransition error
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition { message: message.into() }
    }

    // ========== Error inspection methods ==========

    /// Get the error code for this error
    pub fn error_code(&self) -> ApiErrorCode {
        match self {
            Self::Validation { .. } => ApiErrorCode::Validation,
            Self::NotFound { .. } => ApiErrorCode::NotFound,
            Self::Conflict { .. } => ApiErrorCode::Conflict,
            Self::BusinessRule { .. } => ApiErrorCode::BusinessRule,
            Self::InvalidTransition { .. } => ApiErrorCode::InvalidTransition,
            Self::Storage { .. } => ApiErrorCode::Storage,
            Self::Internal { .. } => ApiErrorCode::Internal,
            Self::Invalid { .. } => ApiErrorCode::Invalid,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::NotFound { resource } => format!("{} not found", resource),
            Self::Conflict { resource } => format!("{} already exists", resource),
            Self::BusinessRule { message } => message.clone(),
            Self::InvalidTransition { message } => message.clone(),
            Self::Storage { message } => message.clone(),
            Self::Internal { message } => message.clone(),
            Self::Invalid { message } => message.clone(),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> Response<axum::body::Body> {
        let code = self.error_code();
        let status = code.status_code();
        let message = self.message();

        let body = ApiResponse::<()>::error(code.code(), message);
        let json_body = serde_json::to_string(&body).unwrap_or_default();

        let body = json_body.into();

        http::Response::builder()
            .status(status)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap_or_else(|_| {
                let body = "Internal error".into();
                http::Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(body)
                    .unwrap()
            })
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
