use assistant_core::config::MarketDataConfig;
use reqwest::{Client, StatusCode};
use tracing::{info, instrument, warn};

use crate::error::AlphaVantageError;
use crate::models::IntradayResponse;

const INTRADAY_FUNCTION: &str = "TIME_SERIES_INTRADAY";

#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    http: Client,
    endpoint: String,
    api_key: String,
    interval: String,
}

impl AlphaVantageClient {
    pub fn from_config(config: &MarketDataConfig) -> Result<Self, AlphaVantageError> {
        Self::new(
            config.endpoint.clone(),
            config.api_key.clone(),
            config.interval.clone(),
        )
    }

    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        interval: impl Into<String>,
    ) -> Result<Self, AlphaVantageError> {
        let http = Client::builder()
            .user_agent("stock-assistant/0.1")
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            interval: interval.into(),
        })
    }

    pub fn interval(&self) -> &str {
        &self.interval
    }

    /// Fetch the intraday series for `symbol`.
    ///
    /// Any status other than 200 is reported as [`AlphaVantageError::HttpStatus`].
    #[instrument(skip(self), fields(interval = %self.interval))]
    pub async fn intraday(&self, symbol: &str) -> Result<IntradayResponse, AlphaVantageError> {
        info!("Alpha Vantage GET {} symbol={}", self.endpoint, symbol);

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("function", INTRADAY_FUNCTION),
                ("symbol", symbol),
                ("interval", self.interval.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            warn!(%status, symbol, "Alpha Vantage returned non-200 status");
            return Err(AlphaVantageError::HttpStatus { status, body });
        }

        let bytes = response.bytes().await?;
        let payload: IntradayResponse = serde_json::from_slice(&bytes)?;

        if let Some(advisory) = payload.advisory() {
            warn!(symbol, advisory, "Alpha Vantage attached an advisory message");
        }

        Ok(payload)
    }
}
