//! Quote Server - international shopping quote-to-order backend
//!
//! # Architecture
//!
//! - **Pricing** (`pricing`): deterministic landed-cost calculator
//! - **Currency** (`currency`): exchange-rate cache and conversion
//! - **Status** (`status`): data-driven status flows and transition engine
//! - **Services** (`services`): quote intake, checkout, email, functions
//! - **Storage** (`db`): in-memory store behind per-resource repositories
//! - **HTTP API** (`api`): RESTful routes and handlers
//!
//! # Module layout
//!
//! ```text
//! quote-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── pricing/       # landed-cost calculator
//! ├── currency/      # rate cache and currency service
//! ├── status/        # flow tables and transition engine
//! ├── services/      # quote, checkout, email, function client
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # store, seed data, repositories
//! └── utils/         # logger, retry, address validation
//! ```

pub mod api;
pub mod core;
pub mod currency;
pub mod db;
pub mod pricing;
pub mod services;
pub mod status;
pub mod utils;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use currency::{CurrencyService, RateCache};
pub use pricing::{calculate, CalculationInput};
pub use status::{StatusEngine, StatusFlows};
pub use utils::{AppError, AppResult, RetryPolicy};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
