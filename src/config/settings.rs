//! Application settings and bot configuration.

use serde::{Deserialize, Serialize};

/// Default TikTok endpoint; overridable for tests and proxies.
const DEFAULT_BASE_URL: &str = "https://www.tiktok.com";

/// Telegram bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot API token (obtain from `@BotFather`).
    pub token: String,
}

impl BotConfig {
    /// Creates configuration from environment variables.
    ///
    /// Expects `BOT_TOKEN` to be set.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token =
            std::env::var("BOT_TOKEN").map_err(|_| ConfigError::MissingEnvVar("BOT_TOKEN"))?;

        if token.trim().is_empty() {
            return Err(ConfigError::EmptyEnvVar("BOT_TOKEN"));
        }

        Ok(Self { token })
    }
}

/// Checker-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerSettings {
    /// Base URL of the TikTok endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum number of concurrent checks.
    #[serde(default = "default_concurrent_limit")]
    pub concurrent_limit: usize,

    /// Timeout for a single HTTP request in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Number of attempts per username before giving up.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retry attempts in seconds (scales linearly).
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Minimum interval between bulk requests in milliseconds.
    #[serde(default = "default_bulk_delay")]
    pub bulk_delay_ms: u64,

    /// Maximum number of usernames accepted in one bulk upload.
    #[serde(default = "default_max_bulk_count")]
    pub max_bulk_count: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_concurrent_limit() -> usize {
    10
}

fn default_request_timeout() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    2
}

fn default_bulk_delay() -> u64 {
    500
}

fn default_max_bulk_count() -> usize {
    500
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            concurrent_limit: default_concurrent_limit(),
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay(),
            bulk_delay_ms: default_bulk_delay(),
            max_bulk_count: default_max_bulk_count(),
        }
    }
}

impl CheckerSettings {
    /// Creates checker settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self {
            base_url: std::env::var("TIKTOK_BASE_URL").unwrap_or_else(|_| default_base_url()),
            concurrent_limit: env_parsed("CHECKER_CONCURRENCY", default_concurrent_limit),
            request_timeout_secs: env_parsed("CHECKER_TIMEOUT_SECS", default_request_timeout),
            max_retries: env_parsed("CHECKER_MAX_RETRIES", default_max_retries),
            retry_delay_secs: env_parsed("CHECKER_RETRY_DELAY_SECS", default_retry_delay),
            bulk_delay_ms: env_parsed("CHECKER_BULK_DELAY_MS", default_bulk_delay),
            max_bulk_count: env_parsed("CHECKER_MAX_BULK", default_max_bulk_count),
        }
    }
}

/// Reads and parses an environment variable, falling back to a default.
fn env_parsed<T: std::str::FromStr>(name: &str, default: fn() -> T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(default)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Environment variable {0} is set but empty")]
    EmptyEnvVar(&'static str),
}
