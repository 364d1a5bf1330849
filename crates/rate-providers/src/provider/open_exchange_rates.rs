//! Open Exchange Rates provider for fiat currency rates.
//!
//! Fetches the latest fiat exchange rates from openexchangerates.org,
//! quoted against the USD base on the free tier.

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

const PROVIDER_ID: &str = "OPEN_EXCHANGE_RATES";

const LATEST_URL: &str = "https://openexchangerates.org/api/latest.json";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response from the `latest.json` endpoint.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

/// Open Exchange Rates provider for fiat currency rates.
pub struct OpenExchangeRatesProvider {
    client: Client,
    app_id: String,
}

impl OpenExchangeRatesProvider {
    /// Create a new provider with the given application id.
    pub fn new(app_id: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, app_id }
    }
}

#[async_trait]
impl RateProvider for OpenExchangeRatesProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self) -> Result<HashMap<String, Decimal>, ProviderError> {
        let url = format!("{}?app_id={}", LATEST_URL, self.app_id);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::ProviderRejected {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let body: LatestRatesResponse = response.json().await?;

        let mut rates = HashMap::with_capacity(body.rates.len());
        for (code, value) in body.rates {
            match Decimal::from_f64(value) {
                Some(rate) => {
                    rates.insert(code, rate);
                }
                None => {
                    debug!("Skipping unrepresentable rate for {}: {}", code, value);
                }
            }
        }

        if rates.is_empty() {
            return Err(ProviderError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: "empty rate table".to_string(),
            });
        }

        Ok(rates)
    }
}
