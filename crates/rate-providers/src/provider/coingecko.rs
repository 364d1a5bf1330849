//! CoinGecko provider for crypto currency rates.
//!
//! Fetches current market prices for the top coins from the CoinGecko
//! `coins/markets` endpoint, quoted in the base currency. Symbols are
//! upper-cased so they line up with fiat currency codes in the merged table.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::provider::RateProvider;

const PROVIDER_ID: &str = "COINGECKO";

const MARKETS_URL: &str = "https://api.coingecko.com/api/v3/coins/markets";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One entry of the `coins/markets` response. Fields we do not use are
/// ignored by serde.
#[derive(Debug, Deserialize)]
struct CoinMarket {
    symbol: Option<String>,
    current_price: Option<f64>,
}

/// CoinGecko provider for crypto currency rates.
pub struct CoinGeckoProvider {
    client: Client,
    api_key: String,
}

impl CoinGeckoProvider {
    /// Create a new provider with the given demo API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }
}

#[async_trait]
impl RateProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self) -> Result<HashMap<String, Decimal>, ProviderError> {
        let url = format!("{}?vs_currency=usd", MARKETS_URL);

        let response = self
            .client
            .get(&url)
            .header("x-cg-demo-api-key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::ProviderRejected {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let markets: Vec<CoinMarket> = response.json().await?;

        let mut rates = HashMap::with_capacity(markets.len());
        for market in markets {
            let (symbol, price) = match (market.symbol, market.current_price) {
                (Some(symbol), Some(price)) => (symbol, price),
                _ => continue,
            };

            match Decimal::from_f64(price) {
                Some(rate) => {
                    rates.insert(symbol.to_uppercase(), rate);
                }
                None => {
                    debug!("Skipping unrepresentable price for {}: {}", symbol, price);
                }
            }
        }

        if rates.is_empty() {
            return Err(ProviderError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: "no markets returned".to_string(),
            });
        }

        Ok(rates)
    }
}
