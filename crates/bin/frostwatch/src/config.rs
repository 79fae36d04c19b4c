//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `frostwatch.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use frostwatch_app::config::{TimingConfig, TimingError};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Monitoring server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Poll interval and delays.
    pub timing: TimingConfig,
    /// Which devices to report.
    pub watch: WatchConfig,
}

/// Monitoring server location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL the `/api/...` paths are appended to.
    pub base_url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Device selection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Device names whose cards are reported. Empty means every device.
    pub devices: Vec<String>,
    /// Device followed by the detail poller, if any.
    pub detail_device: Option<String>,
}

impl Config {
    /// Load configuration from `frostwatch.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("frostwatch.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("FROSTWATCH_URL") {
            self.server.base_url = val;
        }
        if let Some(val) = var("FROSTWATCH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("FROSTWATCH_DEVICE") {
            let val = val.trim();
            self.watch.detail_device = (!val.is_empty()).then(|| val.to_string());
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        self.logging.env_filter()?;
        self.timing.validate()?;
        Ok(())
    }
}

impl LoggingConfig {
    /// Build the subscriber filter from the configured directive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogFilter`] when the directive does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.filter).map_err(|source| ConfigError::LogFilter {
            filter: self.filter.clone(),
            source,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "frostwatch=info,frostwatch_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// `server.base_url` is blank.
    #[error("server.base_url must not be empty")]
    EmptyBaseUrl,
    /// Unparseable `logging.filter` or `RUST_LOG`.
    #[error("invalid log filter {filter:?}")]
    LogFilter {
        filter: String,
        #[source]
        source: ParseError,
    },
    /// Unusable timing values.
    #[error("invalid timing: {0}")]
    Validation(#[from] TimingError),
}
