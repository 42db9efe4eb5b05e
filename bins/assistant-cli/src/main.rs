use alphavantage::AlphaVantageClient;
use anyhow::{Context, Result};
use assistant_core::config::AppConfig;
use clap::{Parser, Subcommand};
use omnistack::Conversation;
use stock_tools::get_stock_price;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_PROMPT: &str = "What's the IBM stock price today?";

#[derive(Parser, Debug)]
#[command(
    name = "assistant-cli",
    about = "Function-calling stock assistant backed by OmniStack",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ask the model a question, letting it call the stock tools
    Chat {
        /// User message
        #[arg(long, short = 'p', default_value = DEFAULT_PROMPT)]
        prompt: String,
    },
    /// Run the stock price tool directly, without the model
    Quote {
        /// Ticker symbol, e.g. IBM (the demo key only serves IBM)
        #[arg(long, short = 't')]
        ticker: String,
    },
    /// Print the function schemas advertised to the model
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { prompt } => handle_chat(&prompt).await,
        Commands::Quote { ticker } => handle_quote(&ticker).await?,
        Commands::Tools => handle_tools()?,
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

/// Every failure ends up as one line on stdout; the process still exits normally.
async fn handle_chat(prompt: &str) {
    match chat(prompt).await {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(err) => {
            error!(error = ?err, "chat interaction failed");
            println!("Error during chat interaction: {:#}", err);
        }
    }
}

async fn chat(prompt: &str) -> Result<Vec<String>> {
    let config = AppConfig::load_from_env()?;
    let conversation = Conversation::from_app_config(&config)?;
    let outcome = conversation.run(prompt).await?;
    Ok(outcome.report())
}

/// Schemas exactly as the conversation would advertise them.
fn handle_tools() -> Result<()> {
    let config = AppConfig::load_from_env()?;
    let conversation = Conversation::from_app_config(&config)?;
    println!(
        "{}",
        serde_json::to_string_pretty(conversation.registry().schemas())?
    );
    Ok(())
}

async fn handle_quote(ticker: &str) -> Result<()> {
    let config = AppConfig::load_from_env()?;
    let client = AlphaVantageClient::from_config(&config.market_data)
        .context("failed to build Alpha Vantage client")?;

    let quote = get_stock_price(&client, ticker).await?;
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}
