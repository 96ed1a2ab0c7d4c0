use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AppError;
use crate::notify::NotificationPermission;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub finnhub: FinnhubConfig,
    pub polling: PollingConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinnhubConfig {
    pub rest_base_url: String,
    pub default_symbol: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(skip)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub permission: NotificationPermission,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            permission: NotificationPermission::Default,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl FinnhubConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn default_symbol(&self) -> String {
        normalize_symbol(&self.default_symbol)
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Trim and uppercase a user-entered ticker.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var("STOCK_PULSE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let mut config = Self::from_path(&config_path)?;

        config.finnhub.api_key = std::env::var("FINNHUB_API_KEY")
            .context("FINNHUB_API_KEY not set in .env or environment")?;

        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&config_str).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.finnhub.default_symbol.trim().is_empty() {
            return Err(AppError::Config(
                "finnhub.default_symbol must not be empty".to_string(),
            ));
        }
        if self.polling.interval_secs == 0 {
            return Err(AppError::Config(
                "polling.interval_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
