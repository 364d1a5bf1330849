//! Rate provider trait and implementations.

mod coingecko;
mod open_exchange_rates;
mod traits;

pub use coingecko::CoinGeckoProvider;
pub use open_exchange_rates::OpenExchangeRatesProvider;
pub use traits::RateProvider;
