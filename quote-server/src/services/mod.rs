//! Service layer
//!
//! - [`functions`] - client for the serverless function boundary
//! - [`email`] - best-effort templated email notifications
//! - [`checkout`] - gateway selection and payment creation
//! - [`quote`] - quote intake and recalculation

pub mod checkout;
pub mod email;
pub mod functions;
pub mod quote;

pub use checkout::CheckoutService;
pub use email::EmailService;
pub use functions::{FunctionClient, FunctionError};
pub use quote::QuoteService;
