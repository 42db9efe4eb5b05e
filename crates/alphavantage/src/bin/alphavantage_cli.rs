use alphavantage::AlphaVantageClient;
use anyhow::{Context, Result};
use assistant_core::config::AppConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "alphavantage-cli", about = "Standalone Alpha Vantage smoke-test tool", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the most recent intraday bars for a symbol
    Intraday {
        /// Ticker symbol, e.g. IBM
        #[arg(long, short = 's')]
        symbol: String,
        /// Number of bars to print
        #[arg(long, short = 'l', default_value = "5")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = AppConfig::load_from_env()?;
    let client = AlphaVantageClient::from_config(&config.market_data)
        .context("failed to build Alpha Vantage client")?;

    match cli.command {
        Command::Intraday { symbol, limit } => {
            let response = client.intraday(&symbol).await?;
            let Some(series) = response.time_series(client.interval()) else {
                println!(
                    "No intraday data for {}: {}",
                    symbol,
                    response.advisory().unwrap_or("empty series")
                );
                return Ok(());
            };

            println!("Retrieved {} bars, showing {}:", series.len(), limit.min(series.len()));
            for (timestamp, bar) in series.recent(limit) {
                println!(
                    "  {} o={} h={} l={} c={} v={}",
                    timestamp,
                    bar.open.as_deref().unwrap_or("-"),
                    bar.high.as_deref().unwrap_or("-"),
                    bar.low.as_deref().unwrap_or("-"),
                    bar.close.as_deref().unwrap_or("-"),
                    bar.volume.as_deref().unwrap_or("-"),
                );
            }
        }
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    if tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .is_err()
    {
        // tracing already initialised; ignore.
    }
    Ok(())
}
