//! Currency Module
//!
//! Conversion and formatting over an injected rate cache. A stale or
//! unreachable rate source never blocks checkout: the last-known rate is
//! used, and a missing rate degrades to 1:1 with a logged warning.

mod rates;
mod service;

pub use rates::{RateCache, RateEntry};
pub use service::{CurrencyError, CurrencyService};
