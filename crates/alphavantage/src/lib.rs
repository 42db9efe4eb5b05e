pub mod client;
pub mod error;
pub mod models;

pub use client::AlphaVantageClient;
pub use error::AlphaVantageError;
pub use models::{IntradayBar, IntradayResponse, IntradaySeries};
