//! Storage layer
//!
//! An in-process concurrent store plus per-resource repositories. The
//! original platform persisted to a hosted backend; here the same row
//! shapes live behind repository types so the rest of the server never
//! touches the maps directly.

pub mod repository;
pub mod seed;
pub mod store;

pub use repository::*;
pub use store::MemoryStore;

use thiserror::Error;

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for shared::ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(r) => shared::ApiError::not_found(r),
            StoreError::Duplicate(r) => shared::ApiError::conflict(r),
            StoreError::Validation(m) => shared::ApiError::validation(m),
            StoreError::Storage(m) => shared::ApiError::storage(m),
        }
    }
}
