//! Repository Module
//!
//! Per-resource CRUD over the shared in-memory store. Repositories are the
//! only code that touches the store's tables directly.

// Quotes and orders
pub mod order;
pub mod quote;

// Customer data
pub mod address;
pub mod payment;

// Reference data
pub mod country;
pub mod gateway;

// System
pub mod email_settings;
pub mod transition;

// Re-exports
pub use address::AddressRepository;
pub use country::CountryRepository;
pub use email_settings::EmailSettingsRepository;
pub use gateway::GatewayRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use quote::QuoteRepository;
pub use transition::TransitionRepository;
