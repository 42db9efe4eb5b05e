use alphavantage::AlphaVantageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool `{tool}` expects a JSON object of arguments, got {found}")]
    InvalidArguments { tool: String, found: &'static str },
    #[error("tool `{tool}` is missing required argument `{argument}`")]
    MissingArgument { tool: String, argument: String },
    #[error("tool `{tool}` got unexpected argument `{argument}`")]
    UnexpectedArgument { tool: String, argument: String },
    #[error("tool `{tool}` argument `{argument}` must be a {expected}")]
    InvalidArgumentType {
        tool: String,
        argument: String,
        expected: &'static str,
    },
    #[error("market data request failed: {0}")]
    MarketData(#[from] AlphaVantageError),
    #[error("failed to serialize tool output: {0}")]
    Serialize(#[from] serde_json::Error),
}
