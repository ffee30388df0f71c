use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use super::RateProvider;
use crate::rates::RateTable;

// OpenErApiProvider implementation for RateProvider (historical rates).
// The strategy is constructed for a specific calendar date; the remote
// endpoint takes no base currency parameter, so the trait argument is
// ignored here.
pub struct OpenErApiProvider {
    base_url: String,
    date: NaiveDate,
}

impl OpenErApiProvider {
    pub fn new(base_url: &str, date: NaiveDate) -> Self {
        OpenErApiProvider {
            base_url: base_url.to_string(),
            date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HistoricalRatesResponse {
    rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl RateProvider for OpenErApiProvider {
    async fn fetch_rates(&self, _base_currency: &str) -> Result<RateTable> {
        let date = self.date.format("%Y-%m-%d").to_string();
        let url = format!("{}/{}", self.base_url, date);
        debug!("Requesting historical exchange rates from {}", url);

        let client = reqwest::Client::builder().user_agent("xrc/1.0").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for date: {}", e, date))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for date: {}",
                response.status(),
                date
            ));
        }

        let text = response.text().await?;

        let data: HistoricalRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for date {}: {}", date, e))?;

        let rates = data
            .rates
            .ok_or_else(|| anyhow!("'rates' field missing in response for date: {}", date))?;

        debug!("Fetched {} historical rates", rates.len());
        Ok(RateTable::new(rates))
    }
}
