use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::rates_model::{CurrencyCode, RateEntry};
use super::rates_traits::RateRepositoryTrait;
use crate::errors::Result;

/// In-memory rate store keyed by currency code.
///
/// Reference implementation of [`RateRepositoryTrait`] backed by a
/// concurrent map: each key is updated atomically, so a conversion reading
/// mid-sync observes either the old or the new entry for that code. There is
/// no table-level snapshot and none is required.
#[derive(Default)]
pub struct InMemoryRateRepository {
    entries: DashMap<CurrencyCode, RateEntry>,
}

impl InMemoryRateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateRepositoryTrait for InMemoryRateRepository {
    async fn upsert_many(&self, rates: &HashMap<CurrencyCode, Decimal>) -> Result<usize> {
        let now = Utc::now();
        for (code, rate) in rates {
            self.entries.insert(
                code.clone(),
                RateEntry {
                    code: code.clone(),
                    rate: *rate,
                    last_updated: now,
                },
            );
        }
        Ok(rates.len())
    }

    fn get(&self, code: &CurrencyCode) -> Result<Option<RateEntry>> {
        Ok(self.entries.get(code).map(|entry| entry.clone()))
    }

    fn list_all(&self) -> Result<Vec<RateEntry>> {
        Ok(self.entries.iter().map(|entry| entry.clone()).collect())
    }
}
