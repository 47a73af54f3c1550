//! Data models
//!
//! Shared between the quote server and API clients.
//! Monetary amounts are stored as `f64` in USD unless a field name says
//! otherwise; all arithmetic happens in `rust_decimal` on the server side.

pub mod address;
pub mod breakdown;
pub mod country;
pub mod email_settings;
pub mod gateway;
pub mod order;
pub mod quote;
pub mod transition;

// Re-exports
pub use address::*;
pub use breakdown::*;
pub use country::*;
pub use email_settings::*;
pub use gateway::*;
pub use order::*;
pub use quote::*;
pub use transition::*;
