use std::sync::Arc;

use super::rates_model::{CurrencyCode, RateEntry};
use super::rates_traits::{RateRepositoryTrait, RatesServiceTrait};
use crate::errors::{Error, Result};

/// Read-facing rate operations for upstream callers (request handlers,
/// report generators). Writes stay with the sync job.
pub struct RatesService<R: RateRepositoryTrait> {
    repository: Arc<R>,
}

impl<R: RateRepositoryTrait> RatesService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R: RateRepositoryTrait> RatesServiceTrait for RatesService<R> {
    fn get_rate(&self, code: &CurrencyCode) -> Result<RateEntry> {
        self.repository
            .get(code)?
            .ok_or_else(|| Error::CurrencyNotFound(code.to_string()))
    }

    fn list_rates(&self) -> Result<Vec<RateEntry>> {
        let mut rates = self.repository.list_all()?;
        rates.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(rates)
    }
}
