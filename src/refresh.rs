//! Scheduled rate refresh for `--auto-update`.

use crate::rate_provider::RateProvider;
use crate::store::RateStore;
use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

/// Fetches and caches rates every `interval_hours` hours, forever. A
/// failed iteration is logged and the loop carries on; there is no
/// cancellation mechanism beyond killing the process.
pub async fn run(
    provider: &dyn RateProvider,
    store: &RateStore,
    base_currency: &str,
    interval_hours: u64,
) -> Result<()> {
    let interval = Duration::from_secs(interval_hours * 3600);
    info!(
        "Refreshing {} rates every {} hour(s)",
        base_currency, interval_hours
    );

    loop {
        match provider.fetch_rates(base_currency).await {
            Ok(table) => {
                if let Err(e) = store.save(&table) {
                    warn!(error = %e, "Failed to save refreshed rates");
                } else {
                    info!("Exchange rates refreshed ({} currencies)", table.len());
                }
            }
            Err(e) => warn!(error = %e, "Scheduled rate refresh failed"),
        }

        tokio::time::sleep(interval).await;
    }
}
