//! Exchange rate cache
//!
//! USD-based rates in a concurrent map, seeded from the country table and
//! refreshed periodically from a live source through the shared retry
//! policy. Refresh failures keep the last-known rates.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Deserialize;

use crate::utils::RetryPolicy;

/// One cached rate: how many units of the currency per 1 USD
#[derive(Debug, Clone, Copy)]
pub struct RateEntry {
    pub rate_from_usd: f64,
    pub updated_at: DateTime<Utc>,
}

/// Injected exchange-rate cache (no module-level globals)
#[derive(Clone)]
pub struct RateCache {
    rates: Arc<DashMap<String, RateEntry>>,
}

/// Live source response shape: `{"rates": {"NPR": 132.5, ...}}`
#[derive(Debug, Deserialize)]
struct RateSourceResponse {
    rates: HashMap<String, f64>,
}

impl RateCache {
    pub fn new() -> Self {
        Self {
            rates: Arc::new(DashMap::new()),
        }
    }

    /// Seed the cache, typically from the country table's seed rates
    pub fn seed(&self, seed_rates: impl IntoIterator<Item = (String, f64)>) {
        let now = Utc::now();
        for (currency, rate) in seed_rates {
            if rate > 0.0 {
                self.rates.insert(
                    currency.to_uppercase(),
                    RateEntry {
                        rate_from_usd: rate,
                        updated_at: now,
                    },
                );
            }
        }
        // USD is always 1:1 with itself
        self.rates.insert(
            "USD".to_string(),
            RateEntry {
                rate_from_usd: 1.0,
                updated_at: now,
            },
        );
    }

    /// Last-known rate for a currency, if any
    pub fn get(&self, currency: &str) -> Option<RateEntry> {
        self.rates.get(currency.to_uppercase().as_str()).map(|e| *e)
    }

    /// Store a fresh rate
    pub fn set(&self, currency: &str, rate_from_usd: f64) {
        if rate_from_usd <= 0.0 {
            return;
        }
        self.rates.insert(
            currency.to_uppercase(),
            RateEntry {
                rate_from_usd,
                updated_at: Utc::now(),
            },
        );
    }

    /// Number of cached currencies
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Fetch the live source once and merge its rates
    ///
    /// Failure leaves the cache untouched; callers keep last-known rates.
    pub async fn refresh_from(
        &self,
        client: &reqwest::Client,
        url: &str,
        policy: &RetryPolicy,
    ) -> Result<usize, reqwest::Error> {
        let response = policy
            .run("rate_refresh", || async {
                client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<RateSourceResponse>()
                    .await
            })
            .await?;

        let mut updated = 0;
        for (currency, rate) in response.rates {
            if rate > 0.0 {
                self.set(&currency, rate);
                updated += 1;
            }
        }
        tracing::info!(updated, "exchange rates refreshed");
        Ok(updated)
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}
