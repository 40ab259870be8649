//! Layered settings: built-in defaults, then an optional TOML file, then
//! `QUOTES_*` environment variables (`__` separates nested keys, lists are
//! comma-separated: `QUOTES_MARKETS=BTC-USD,ETH-USD`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::market_data::adapters::dydx::DEFAULT_BASE_URL;
use crate::market_data::fetcher::{RetryPolicy, DEFAULT_ATTEMPTS};
use crate::persist::s3::{DEFAULT_BUCKET, DEFAULT_REGION};
use crate::quote::validator::DEFAULT_MAX_SPREAD_TICKS;
use crate::router::DEFAULT_MAX_CONCURRENCY;

pub const DEFAULT_CONFIG_FILE: &str = "quote-recorder.toml";
pub const ENV_PREFIX: &str = "QUOTES";
const SECS_PER_DAY: u32 = 86_400;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub markets: Vec<String>,
    pub exchange: ExchangeConfig,
    pub retry: RetryConfig,
    pub validation: ValidationConfig,
    pub dispatch: DispatchConfig,
    pub batch: BatchConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub attempts: u32,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub max_spread_ticks: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub bucket_secs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    S3,
    Local,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: Backend,
    pub bucket: String,
    pub region: String,
    pub root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            markets: vec!["BTC-USD".to_string()],
            exchange: ExchangeConfig::default(),
            retry: RetryConfig::default(),
            validation: ValidationConfig::default(),
            dispatch: DispatchConfig::default(),
            batch: BatchConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), request_timeout_ms: 5_000 }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { attempts: DEFAULT_ATTEMPTS, delay_ms: 500 }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { max_spread_ticks: DEFAULT_MAX_SPREAD_TICKS }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { max_concurrency: DEFAULT_MAX_CONCURRENCY }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { bucket_secs: 60 }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::S3,
            bucket: DEFAULT_BUCKET.to_string(),
            region: DEFAULT_REGION.to_string(),
            root: PathBuf::from("./data"),
        }
    }
}

impl AppConfig {
    /// Load settings. An explicitly given file must exist; the default file is optional.
    /// Nothing is validated here: callers apply their overrides, then call `validate`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("markets")
            .try_parsing(true);

        let cfg: AppConfig = Config::builder().add_source(file).add_source(env).build()?.try_deserialize()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.markets.is_empty() || self.markets.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::Invalid { key: "markets", reason: "need at least one non-empty market".into() });
        }
        if self.retry.attempts == 0 {
            return Err(ConfigError::Invalid { key: "retry.attempts", reason: "must be at least 1".into() });
        }
        if !(self.validation.max_spread_ticks > 0.0) {
            return Err(ConfigError::Invalid {
                key: "validation.max_spread_ticks",
                reason: format!("must be positive, got {}", self.validation.max_spread_ticks),
            });
        }
        // a bucket that straddles midnight would stamp rows into the wrong day file
        if self.batch.bucket_secs == 0 || SECS_PER_DAY % self.batch.bucket_secs != 0 {
            return Err(ConfigError::Invalid {
                key: "batch.bucket_secs",
                reason: format!("must divide {} evenly, got {}", SECS_PER_DAY, self.batch.bucket_secs),
            });
        }
        if self.dispatch.max_concurrency == 0 {
            return Err(ConfigError::Invalid { key: "dispatch.max_concurrency", reason: "must be at least 1".into() });
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy { attempts: self.retry.attempts, delay: Duration::from_millis(self.retry.delay_ms) }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.exchange.request_timeout_ms)
    }
}
