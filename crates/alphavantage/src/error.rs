use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlphaVantageError {
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("unexpected http status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("failed to deserialize payload: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl AlphaVantageError {
    /// The upstream answered, just not with 200.
    pub fn is_http_status(&self) -> bool {
        matches!(self, Self::HttpStatus { .. })
    }
}
