use super::rates_model::{CurrencyCode, RateEntry};
use crate::errors::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Trait defining the contract for the rate store.
///
/// The store keeps exactly one entry per currency code. Writes happen only
/// through `upsert_many`; codes absent from an input mapping are left
/// untouched, so a provider that temporarily omits a currency never erases
/// it. Consistency is per key: a reader sees either the pre-cycle or the
/// post-cycle value for a given code, never a torn write.
#[async_trait]
pub trait RateRepositoryTrait: Send + Sync {
    /// Update existing entries and insert missing ones. Returns the number
    /// of entries written.
    async fn upsert_many(&self, rates: &HashMap<CurrencyCode, Decimal>) -> Result<usize>;

    fn get(&self, code: &CurrencyCode) -> Result<Option<RateEntry>>;

    fn list_all(&self) -> Result<Vec<RateEntry>>;
}

/// Trait defining the read-facing rate operations for upstream callers.
pub trait RatesServiceTrait: Send + Sync {
    fn get_rate(&self, code: &CurrencyCode) -> Result<RateEntry>;

    fn list_rates(&self) -> Result<Vec<RateEntry>>;
}
