use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use super::RateProvider;
use crate::rates::RateTable;

// ExchangeRateApiProvider implementation for RateProvider (live rates)
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "LiveRateFetch",
        skip(self),
        fields(base = %base_currency)
    )]
    async fn fetch_rates(&self, base_currency: &str) -> Result<RateTable> {
        let url = format!("{}/{}/latest/{}", self.base_url, self.api_key, base_currency);
        debug!("Requesting live exchange rates from {}", url);

        let client = reqwest::Client::builder().user_agent("xrc/1.0").build()?;
        let response = client.get(&url).send().await.map_err(|e| {
            anyhow!(
                "Request error: {} for base currency: {}",
                e,
                base_currency
            )
        })?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base_currency
            ));
        }

        let text = response.text().await?;

        let data: RatesResponse = serde_json::from_str(&text).map_err(|e| {
            anyhow!(
                "Failed to parse JSON response for base {}: {}",
                base_currency,
                e
            )
        })?;

        let rates = data.rates.ok_or_else(|| {
            anyhow!(
                "'rates' field missing in response for base currency: {}",
                base_currency
            )
        })?;

        debug!("Fetched {} live rates", rates.len());
        Ok(RateTable::new(rates))
    }
}
