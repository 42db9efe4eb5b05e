use alphavantage::AlphaVantageClient;
use assistant_core::types::StockQuote;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::args::Arguments;
use crate::error::ToolError;
use crate::registry::ToolHandler;
use crate::schema::GET_STOCK_PRICE;

const MISSING_OPEN: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockPriceArgs {
    pub ticker: String,
}

impl StockPriceArgs {
    pub fn from_arguments(arguments: &Map<String, Value>) -> Result<Self, ToolError> {
        let mut args = Arguments::new(GET_STOCK_PRICE, arguments);
        let ticker = args.required_str("ticker")?;
        args.finish()?;
        Ok(Self { ticker })
    }
}

/// Latest intraday opening price for `ticker`.
///
/// A non-200 reply or an empty series is folded into a placeholder quote;
/// transport and decoding failures are returned as errors.
#[instrument(skip(client))]
pub async fn get_stock_price(
    client: &AlphaVantageClient,
    ticker: &str,
) -> Result<StockQuote, ToolError> {
    let response = match client.intraday(ticker).await {
        Ok(response) => response,
        Err(err) if err.is_http_status() => {
            warn!(error = %err, "price lookup failed, returning placeholder");
            return Ok(StockQuote::unavailable(ticker));
        }
        Err(err) => return Err(err.into()),
    };

    let Some(series) = response.time_series(client.interval()) else {
        warn!("no intraday series in response, returning placeholder");
        return Ok(StockQuote::unavailable(ticker));
    };

    let quote = match series.latest() {
        Some((timestamp, bar)) => {
            info!(timestamp, "selected latest intraday bar");
            StockQuote::new(ticker, bar.open.as_deref().unwrap_or(MISSING_OPEN))
        }
        None => StockQuote::unavailable(ticker),
    };

    Ok(quote)
}

/// Registry adapter around [`get_stock_price`].
#[derive(Debug, Clone)]
pub struct StockPriceTool {
    client: AlphaVantageClient,
}

impl StockPriceTool {
    pub fn new(client: AlphaVantageClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for StockPriceTool {
    fn name(&self) -> &'static str {
        GET_STOCK_PRICE
    }

    async fn invoke(&self, arguments: &Map<String, Value>) -> Result<Value, ToolError> {
        let args = StockPriceArgs::from_arguments(arguments)?;
        let quote = get_stock_price(&self.client, &args.ticker).await?;
        Ok(serde_json::to_value(quote)?)
    }
}
