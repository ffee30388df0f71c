use anyhow::Result;
use clap::{CommandFactory, Parser};
use xrc::convert::ConversionRequest;
use xrc::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Amount to convert
    amount: Option<f64>,

    /// Currency to convert from (e.g., USD)
    from_currency: Option<String>,

    /// Currency to convert to (e.g., EUR)
    to_currency: Option<String>,

    /// Base currency for exchange rates (default: EUR)
    #[arg(long)]
    base: Option<String>,

    /// Update exchange rates before converting
    #[arg(long)]
    update: bool,

    /// Historical date for exchange rates (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,

    /// Multiple conversions in format amount,from,to (e.g., 100,USD,EUR 50,EUR,JPY)
    #[arg(long, num_args = 1..)]
    multiple: Vec<ConversionRequest>,

    /// Automatically update rates every N hours
    #[arg(long, value_name = "N")]
    auto_update: Option<u64>,

    /// Interactive mode for conversions
    #[arg(long)]
    interactive: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long)]
    config_path: Option<String>,
}

impl Cli {
    fn conversions(&self) -> Result<Vec<ConversionRequest>> {
        if !self.multiple.is_empty() {
            return Ok(self.multiple.clone());
        }

        match (&self.amount, &self.from_currency, &self.to_currency) {
            (Some(amount), Some(from), Some(to)) => {
                Ok(vec![ConversionRequest::new(*amount, from, to)])
            }
            (None, None, None) => Ok(Vec::new()),
            _ => anyhow::bail!("amount, from_currency and to_currency must be given together"),
        }
    }

    fn requests_work(&self) -> bool {
        self.amount.is_some()
            || !self.multiple.is_empty()
            || self.update
            || self.date.is_some()
            || self.auto_update.is_some()
            || self.interactive
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if !cli.requests_work() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let options = xrc::RunOptions {
        base_currency: cli.base.clone(),
        update: cli.update,
        date: cli.date.clone(),
        conversions: cli.conversions()?,
        auto_update_hours: cli.auto_update,
        interactive: cli.interactive,
    };

    let result = xrc::run(options, cli.config_path.as_deref()).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
