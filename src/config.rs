//! Runtime configuration loaded from the process environment.
//!
//! The DeepSeek credential is deliberately an `Option`: a missing key is a
//! representable state handled by the signal generator's degrade-to-HOLD
//! path, not a startup failure.

use std::env;
use std::time::Duration;

/// Kraken pair identifiers for Bitcoin, tried in order until one yields
/// data. Kraken aliases Bitcoin as XBT and may key responses under a
/// different identifier than the one requested.
pub const DEFAULT_PAIRS: [&str; 4] = ["XBTUSD", "XXBTZUSD", "XBTUSDT", "BTCUSD"];

pub const DEFAULT_KRAKEN_API_URL: &str = "https://api.kraken.com";
pub const DEFAULT_DEEPSEEK_API_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

/// Deployment environment name, used to pick the log format.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub kraken_api_url: String,
    pub deepseek_api_url: String,
    pub deepseek_model: String,
    pub deepseek_api_key: Option<String>,
    /// Candidate pairs tried in order by the fetcher.
    pub pairs: Vec<String>,
    /// OHLC sampling interval in minutes (Kraken's `interval` parameter).
    pub ohlc_interval_minutes: u32,
    /// How far back the fetch window reaches.
    pub ohlc_window: chrono::Duration,
    /// Request timeout for the market-data call.
    pub fetch_timeout: Duration,
    /// Request timeout for the completion call. Larger than `fetch_timeout`
    /// since model inference is the slower upstream.
    pub generate_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            kraken_api_url: env::var("KRAKEN_API_URL")
                .unwrap_or_else(|_| DEFAULT_KRAKEN_API_URL.to_string()),
            deepseek_api_url: env::var("DEEPSEEK_API_URL")
                .unwrap_or_else(|_| DEFAULT_DEEPSEEK_API_URL.to_string()),
            deepseek_model: env::var("DEEPSEEK_MODEL")
                .unwrap_or_else(|_| DEFAULT_DEEPSEEK_MODEL.to_string()),
            deepseek_api_key: env::var("DEEPSEEK_API_KEY").ok(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kraken_api_url: DEFAULT_KRAKEN_API_URL.to_string(),
            deepseek_api_url: DEFAULT_DEEPSEEK_API_URL.to_string(),
            deepseek_model: DEFAULT_DEEPSEEK_MODEL.to_string(),
            deepseek_api_key: None,
            pairs: DEFAULT_PAIRS.iter().map(|p| p.to_string()).collect(),
            ohlc_interval_minutes: 60,
            ohlc_window: chrono::Duration::weeks(1),
            fetch_timeout: Duration::from_secs(30),
            generate_timeout: Duration::from_secs(60),
        }
    }
}
