//! Currency Service
//!
//! Conversion through USD cross rates plus display formatting. Conversion
//! failures degrade rather than error at the quote level: callers use
//! [`CurrencyService::convert_or_fallback`] which falls back to 1:1 with a
//! warning.

use rust_decimal::prelude::*;
use thiserror::Error;

use crate::db::CountryRepository;

use super::rates::RateCache;

/// Currency errors
#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("No exchange rate for currency: {0}")]
    MissingRate(String),

    #[error("Unknown country: {0}")]
    UnknownCountry(String),
}

#[derive(Clone)]
pub struct CurrencyService {
    cache: RateCache,
    countries: CountryRepository,
}

impl CurrencyService {
    pub fn new(cache: RateCache, countries: CountryRepository) -> Self {
        Self { cache, countries }
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    /// Convert an amount between currencies via USD cross rates
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, CurrencyError> {
        if from.eq_ignore_ascii_case(to) {
            return Ok(amount);
        }
        let from_rate = self
            .cache
            .get(from)
            .ok_or_else(|| CurrencyError::MissingRate(from.to_string()))?;
        let to_rate = self
            .cache
            .get(to)
            .ok_or_else(|| CurrencyError::MissingRate(to.to_string()))?;

        let usd = Decimal::from_f64(amount).unwrap_or_default()
            / Decimal::from_f64(from_rate.rate_from_usd).unwrap_or(Decimal::ONE);
        let converted = usd * Decimal::from_f64(to_rate.rate_from_usd).unwrap_or(Decimal::ONE);
        Ok(converted
            .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(amount))
    }

    /// Convert, degrading to the unconverted amount on a missing rate
    ///
    /// Returns `(converted_amount, rate_used)`; the rate is 1.0 on fallback.
    pub fn convert_or_fallback(&self, amount: f64, from: &str, to: &str) -> (f64, f64) {
        match self.convert(amount, from, to) {
            Ok(converted) => {
                let rate = if amount == 0.0 { 1.0 } else { converted / amount };
                (converted, rate)
            }
            Err(err) => {
                tracing::warn!(error = %err, from, to, "conversion unavailable, using 1:1");
                (amount, 1.0)
            }
        }
    }

    /// USD rate for a currency, 1:1 fallback with a warning
    pub fn usd_rate_or_fallback(&self, currency: &str) -> f64 {
        match self.cache.get(currency) {
            Some(entry) => entry.rate_from_usd,
            None => {
                tracing::warn!(currency, "no exchange rate cached, using 1:1");
                1.0
            }
        }
    }

    /// Format an amount with the currency's symbol and precision
    ///
    /// Zero-decimal currencies (JPY) get no fraction digits; everything
    /// else gets two.
    pub async fn format(&self, amount: f64, currency: &str) -> String {
        let symbol = self.symbol_for(currency).await;
        if is_zero_decimal(currency) {
            format!("{}{:.0}", symbol, amount)
        } else {
            format!("{}{:.2}", symbol, amount)
        }
    }

    /// ISO currency code for a country code
    pub async fn currency_for_country(&self, country_code: &str) -> Result<String, CurrencyError> {
        let country = self
            .countries
            .find_by_code(country_code)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| CurrencyError::UnknownCountry(country_code.to_string()))?;
        Ok(country.currency)
    }

    async fn symbol_for(&self, currency: &str) -> String {
        let countries = self.countries.find_all().await.unwrap_or_default();
        countries
            .into_iter()
            .find(|c| c.currency.eq_ignore_ascii_case(currency))
            .map(|c| c.symbol)
            .unwrap_or_else(|| format!("{} ", currency.to_uppercase()))
    }
}

fn is_zero_decimal(currency: &str) -> bool {
    matches!(currency.to_uppercase().as_str(), "JPY" | "KRW" | "VND")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn service() -> CurrencyService {
        let store = MemoryStore::with_seed_data();
        let cache = RateCache::new();
        cache.seed(
            store
                .countries
                .iter()
                .map(|c| (c.currency.clone(), c.rate_from_usd)),
        );
        CurrencyService::new(cache, CountryRepository::new(store))
    }

    #[test]
    fn test_convert_usd_to_npr() {
        let svc = service();
        let amount = svc.convert(10.0, "USD", "NPR").unwrap();
        assert_eq!(amount, 1325.0);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let svc = service();
        let there = svc.convert(100.0, "USD", "INR").unwrap();
        let back = svc.convert(there, "INR", "USD").unwrap();
        assert!((back - 100.0).abs() < 0.01, "round trip drifted: {}", back);
    }

    #[test]
    fn test_missing_rate_errors_and_fallback_degrades() {
        let svc = service();
        assert!(matches!(
            svc.convert(5.0, "USD", "XXX"),
            Err(CurrencyError::MissingRate(_))
        ));
        let (amount, rate) = svc.convert_or_fallback(5.0, "USD", "XXX");
        assert_eq!(amount, 5.0);
        assert_eq!(rate, 1.0);
    }

    #[tokio::test]
    async fn test_format_symbol_and_precision() {
        let svc = service();
        assert_eq!(svc.format(1234.5, "USD").await, "$1234.50");
        assert_eq!(svc.format(1234.6, "JPY").await, "¥1235");
    }

    #[tokio::test]
    async fn test_currency_for_country() {
        let svc = service();
        assert_eq!(svc.currency_for_country("np").await.unwrap(), "NPR");
        assert!(svc.currency_for_country("ZZ").await.is_err());
    }
}
