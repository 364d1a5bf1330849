//! Exchange rate provider abstractions and implementations.
//!
//! This crate contains:
//! - The [`RateProvider`] trait that all rate providers implement
//! - Concrete provider implementations (Open Exchange Rates, CoinGecko)
//! - [`RateSource`], which fans out to every configured provider and merges
//!   their partial rate tables into one mapping
//!
//! All rates returned by providers are expressed relative to a single base
//! currency; normalization is the provider's responsibility, not the caller's.

pub mod errors;
pub mod provider;
pub mod source;

pub use errors::ProviderError;
pub use provider::{CoinGeckoProvider, OpenExchangeRatesProvider, RateProvider};
pub use source::RateSource;
