use config::{Config, Environment, File, FileFormat, Source};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::currency::Currency;
use crate::notifications;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_notification_timeout_ms")]
    pub notification_timeout_ms: u64,
    #[serde(default = "default_max_notifications")]
    pub max_notifications: usize,
    #[serde(default)]
    pub default_currency: Currency,
}

fn default_base_url() -> String {
    finboard_api::DEFAULT_BASE_URL.to_string()
}

fn default_notification_timeout_ms() -> u64 {
    notifications::DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_max_notifications() -> usize {
    notifications::DEFAULT_CAPACITY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            notification_timeout_ms: default_notification_timeout_ms(),
            max_notifications: default_max_notifications(),
            default_currency: Currency::default(),
        }
    }
}

impl Settings {
    /// Load from `config.toml` (or the file named by `FINBOARD_CONFIG`), then
    /// `FINBOARD__*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("FINBOARD_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        Self::load(
            File::with_name(&config_path).required(false),
            environment(),
        )
    }

    fn load(
        file: impl Source + Send + Sync + 'static,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid("base_url is required".to_string()));
        }
        if !self.base_url.starts_with("http") {
            return Err(ConfigError::Invalid(
                "base_url must be a valid HTTP(S) URL".to_string(),
            ));
        }
        if self.notification_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "notification_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_notifications == 0 {
            return Err(ConfigError::Invalid(
                "max_notifications must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}

/// `FINBOARD__BASE_URL`, `FINBOARD__NOTIFICATION_TIMEOUT_MS`, ...
fn environment() -> Environment {
    Environment::with_prefix("FINBOARD")
        .separator("__")
        .try_parsing(true)
}
