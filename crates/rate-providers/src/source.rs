//! Unified rate source.
//!
//! [`RateSource`] queries every configured provider concurrently and merges
//! the partial mappings into a single rate table. The merge is deterministic:
//! providers are held in priority order and on a key collision the
//! higher-priority provider wins, regardless of which fetch finished first.
//!
//! The fetch is fail-fast. A silently incomplete rate table could make
//! unrelated currencies unconvertible without signal, so one provider error
//! fails the whole cycle and the caller keeps its previous table.

use futures::future::try_join_all;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::provider::RateProvider;

/// Fans out to all configured rate providers and merges their results.
#[derive(Clone)]
pub struct RateSource {
    /// Providers in descending priority; index 0 wins collisions.
    providers: Vec<Arc<dyn RateProvider>>,
}

impl RateSource {
    /// Create a source from providers listed in descending priority order.
    pub fn new(providers: Vec<Arc<dyn RateProvider>>) -> Self {
        Self { providers }
    }

    /// Fetch all providers concurrently and merge into one mapping.
    ///
    /// Fails with the first provider error; no partial table is returned.
    pub async fn fetch_all(&self) -> Result<HashMap<String, Decimal>, ProviderError> {
        let fetches = self.providers.iter().map(|provider| provider.fetch());
        let partials = try_join_all(fetches).await?;

        let mut merged: HashMap<String, Decimal> = HashMap::new();
        for (provider, partial) in self.providers.iter().zip(partials) {
            debug!("Provider {} returned {} rates", provider.id(), partial.len());
            for (code, rate) in partial {
                // entry() keeps the first insert, i.e. the higher priority one
                merged.entry(code).or_insert(rate);
            }
        }

        Ok(merged)
    }

    /// Number of configured providers.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}
