pub mod config;
pub mod types;

pub use config::{AppConfig, MarketDataConfig, OmniStackConfig};
pub use types::StockQuote;
