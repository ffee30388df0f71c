pub mod config;
pub mod convert;
pub mod interactive;
pub mod log;
pub mod providers;
pub mod rate_provider;
pub mod rates;
pub mod refresh;
pub mod store;
pub mod ui;

use crate::convert::ConversionRequest;
use crate::providers::exchange_rate_api::ExchangeRateApiProvider;
use crate::providers::open_er_api::OpenErApiProvider;
use crate::rate_provider::RateProvider;
use crate::rates::RateTable;
use crate::store::RateStore;
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Everything a single invocation asked for, assembled by the binary
/// from the parsed command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Base currency override from --base; falls back to the config.
    pub base_currency: Option<String>,
    pub update: bool,
    pub date: Option<String>,
    pub conversions: Vec<ConversionRequest>,
    pub auto_update_hours: Option<u64>,
    pub interactive: bool,
}

pub async fn run(options: RunOptions, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let base_currency = options
        .base_currency
        .unwrap_or_else(|| config.base_currency.clone())
        .to_uppercase();

    let date = options
        .date
        .as_deref()
        .map(|d| {
            NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| anyhow!("Invalid date format. Use YYYY-MM-DD."))
        })
        .transpose()?;

    let store = RateStore::new(config.rate_cache_path()?);
    let provider = build_provider(&config, date)?;
    let rates = acquire_rates(
        provider.as_ref(),
        &store,
        &base_currency,
        options.update || date.is_some(),
    )
    .await?;

    if rates.is_empty() {
        bail!("No rates available.");
    }

    if let Some(hours) = options.auto_update_hours {
        // Never returns; refreshes the cache until the process is killed.
        let live = build_provider(&config, None)?;
        return refresh::run(live.as_ref(), &store, &base_currency, hours).await;
    }

    if options.interactive {
        return interactive::run(&rates, &base_currency);
    }

    run_conversions(&options.conversions, &base_currency, &rates);
    Ok(())
}

/// Picks the fetch strategy: historical when a date is given, live
/// otherwise.
fn build_provider(
    config: &config::AppConfig,
    date: Option<NaiveDate>,
) -> Result<Box<dyn RateProvider>> {
    match date {
        Some(date) => {
            let historical = config
                .providers
                .historical
                .as_ref()
                .context("No historical rate provider configured")?;
            Ok(Box::new(OpenErApiProvider::new(&historical.base_url, date)))
        }
        None => {
            let live = config
                .providers
                .live
                .as_ref()
                .context("No live rate provider configured")?;
            Ok(Box::new(ExchangeRateApiProvider::new(
                &live.base_url,
                &live.api_key,
            )))
        }
    }
}

/// Returns a usable rate table: a forced refresh fetches and caches,
/// otherwise the cache is used with a fetch fallback when it is missing.
async fn acquire_rates(
    provider: &dyn RateProvider,
    store: &RateStore,
    base_currency: &str,
    force_fetch: bool,
) -> Result<RateTable> {
    if !force_fetch {
        if let Some(table) = store.load()? {
            debug!("Using cached rates from {}", store.path().display());
            return Ok(table);
        }
        info!("No local exchange rates found, fetching live rates...");
    }

    let spinner = ui::new_spinner("Fetching exchange rates...");
    let result = provider.fetch_rates(base_currency).await;
    spinner.finish_and_clear();

    let table = result.context("No rates available.")?;
    store.save(&table)?;
    Ok(table)
}

/// Runs the batch of requested conversions. An invalid request reports
/// its error and the batch continues; output is a single line for one
/// conversion, a table for several.
fn run_conversions(conversions: &[ConversionRequest], pivot: &str, rates: &RateTable) {
    let mut results = Vec::new();
    for request in conversions {
        match convert::convert(request.amount, &request.from, &request.to, pivot, rates) {
            Ok(converted) => results.push((request, converted)),
            Err(e) => println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
        }
    }

    match results.as_slice() {
        [] => {}
        [(request, converted)] => {
            println!(
                "{}",
                ui::conversion_line(request.amount, &request.from, *converted, &request.to)
            );
        }
        many => {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("Amount"),
                ui::header_cell("From"),
                ui::header_cell("To"),
                ui::header_cell("Converted"),
            ]);
            for (request, converted) in many {
                table.add_row(vec![
                    ui::amount_cell(request.amount),
                    comfy_table::Cell::new(&request.from),
                    comfy_table::Cell::new(&request.to),
                    ui::amount_cell(*converted),
                ]);
            }
            println!("{table}");
        }
    }
}
