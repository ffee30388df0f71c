//! Provides exchange rate snapshots for the application.

use crate::rates::RateTable;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, base_currency: &str) -> Result<RateTable>;
}
