//! Rate provider trait definition.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::ProviderError;

/// Trait for external exchange rate providers.
///
/// Implement this trait to add support for a new rate source. A provider
/// returns its full partial mapping in one call, keyed by currency symbol,
/// with every rate already expressed relative to the base currency.
///
/// A provider that cannot produce its complete mapping must fail the call;
/// it must never return a silently truncated table.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "OPEN_EXCHANGE_RATES". Used for
    /// logging and for deterministic merge ordering in `RateSource`.
    fn id(&self) -> &'static str;

    /// Fetch the provider's current rates.
    async fn fetch(&self) -> Result<HashMap<String, Decimal>, ProviderError>;
}
