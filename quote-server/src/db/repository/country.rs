//! Country & HSN Reference Repository

use shared::models::{Country, HsnRate};

use super::super::{store::MemoryStore, StoreResult};

#[derive(Clone)]
pub struct CountryRepository {
    store: MemoryStore,
}

impl CountryRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// All countries, sorted by code
    pub async fn find_all(&self) -> StoreResult<Vec<Country>> {
        let mut countries: Vec<Country> =
            self.store.countries.iter().map(|c| c.clone()).collect();
        countries.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(countries)
    }

    /// Find a country by ISO code (case-insensitive)
    pub async fn find_by_code(&self, code: &str) -> StoreResult<Option<Country>> {
        Ok(self
            .store
            .countries
            .get(code.to_uppercase().as_str())
            .map(|c| c.clone()))
    }

    /// Look up the HSN duty rate for a classification code
    pub async fn find_hsn(&self, code: &str) -> StoreResult<Option<HsnRate>> {
        Ok(self.store.hsn_rates.get(code).map(|h| h.clone()))
    }

    /// All HSN classification rows, sorted by code
    pub async fn find_all_hsn(&self) -> StoreResult<Vec<HsnRate>> {
        let mut rates: Vec<HsnRate> = self.store.hsn_rates.iter().map(|h| h.clone()).collect();
        rates.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(rates)
    }
}
