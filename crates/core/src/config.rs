use anyhow::{ensure, Context, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_OMNISTACK_ENDPOINT: &str = "https://api.omnistack.sh/openai/v1";
pub const DEFAULT_OMNISTACK_MODEL: &str = "brianne_enoch_victoria";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. if no data available, return N/A.";
pub const DEFAULT_ALPHAVANTAGE_ENDPOINT: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_ALPHAVANTAGE_API_KEY: &str = "demo";
pub const DEFAULT_INTRADAY_INTERVAL: &str = "5min";

/// Chat-completion side of the configuration.
///
/// `api_key` stays optional: without it the client is built unauthenticated
/// and the first request is rejected by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmniStackConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_omnistack_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl OmniStackConfig {
    /// Helper that forces the presence of the OmniStack API key.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .context("OMNISTACK_API_KEY is not set: export it or add it to a .env file")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    #[serde(default = "default_alphavantage_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_alphavantage_api_key")]
    pub api_key: String,
    #[serde(default = "default_interval")]
    pub interval: String,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            endpoint: default_alphavantage_endpoint(),
            api_key: default_alphavantage_api_key(),
            interval: default_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub omnistack: OmniStackConfig,
    #[serde(default)]
    pub market_data: MarketDataConfig,
}

impl AppConfig {
    /// Build configuration from well-known environment variables.
    pub fn load_from_env() -> Result<Self> {
        preload_env_files();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let omnistack = OmniStackConfig {
            api_key: get("OMNISTACK_API_KEY"),
            endpoint: get("OMNISTACK_ENDPOINT").unwrap_or_else(default_omnistack_endpoint),
            model: get("OMNISTACK_MODEL").unwrap_or_else(default_model),
            system_prompt: get("OMNISTACK_SYSTEM_PROMPT").unwrap_or_else(default_system_prompt),
        };

        let market_data = MarketDataConfig {
            endpoint: get("ALPHAVANTAGE_ENDPOINT").unwrap_or_else(default_alphavantage_endpoint),
            api_key: get("ALPHAVANTAGE_API_KEY").unwrap_or_else(default_alphavantage_api_key),
            interval: get("ALPHAVANTAGE_INTERVAL").unwrap_or_else(default_interval),
        };

        let config = Self {
            omnistack,
            market_data,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.omnistack.endpoint.starts_with("http://")
                || self.omnistack.endpoint.starts_with("https://"),
            "OMNISTACK_ENDPOINT must be an http(s) URL, got {}",
            self.omnistack.endpoint
        );
        ensure!(
            self.market_data.endpoint.starts_with("http://")
                || self.market_data.endpoint.starts_with("https://"),
            "ALPHAVANTAGE_ENDPOINT must be an http(s) URL, got {}",
            self.market_data.endpoint
        );
        Ok(())
    }
}

fn default_omnistack_endpoint() -> String {
    DEFAULT_OMNISTACK_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_OMNISTACK_MODEL.to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_alphavantage_endpoint() -> String {
    DEFAULT_ALPHAVANTAGE_ENDPOINT.to_string()
}

fn default_alphavantage_api_key() -> String {
    DEFAULT_ALPHAVANTAGE_API_KEY.to_string()
}

fn default_interval() -> String {
    DEFAULT_INTRADAY_INTERVAL.to_string()
}

fn preload_env_files() {
    // .env in the working directory or any parent, then the workspace root
    let _ = dotenv();

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_env = manifest_dir.join("../../.env");
    if workspace_env.exists() {
        let _ = dotenvy::from_path(workspace_env);
    }
}
