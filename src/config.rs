//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::api::ApiConfig;
use crate::client::{ClientConfig, Environment};
use crate::refresh::RefreshConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for development
    #[default]
    Pretty,
    /// One JSON object per line, for production
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, or the default locations, or environment.
    ///
    /// A default-location file that fails to load is an error here rather
    /// than being skipped.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => {
                let loaded = Self::load_default();
                match loaded.skipped.into_iter().next() {
                    Some(err) => Err(err),
                    None => Ok(loaded.config),
                }
            }
        }
    }

    /// Load from default locations or environment.
    ///
    /// Nothing is logged here, since this usually runs before the subscriber
    /// exists. Call [`LoadedConfig::log`] once logging is up.
    pub fn load_default() -> LoadedConfig {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("tally").join("config.toml")),
            Some(PathBuf::from("/etc/tally/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first candidate that exists and parses
    pub fn load_first(candidates: &[PathBuf]) -> LoadedConfig {
        let mut skipped = Vec::new();

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return LoadedConfig {
                        config,
                        source: Some(path.clone()),
                        skipped,
                    }
                }
                Err(e) => skipped.push(e),
            }
        }

        LoadedConfig {
            config: Self::from_env(),
            source: None,
            skipped,
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `TALLY_*` overrides from an arbitrary lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("TALLY_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("TALLY_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid TALLY_API_PORT: {}", port),
            }
        }

        if let Some(env) = lookup("TALLY_ENV") {
            match env.parse::<Environment>() {
                Ok(e) => self.client.environment = e,
                Err(e) => tracing::warn!("Ignoring TALLY_ENV: {}", e),
            }
        }
        if let Some(url) = lookup("TALLY_API_BASE_URL") {
            self.client.base_url = Some(url);
        }

        if let Some(level) = lookup("TALLY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TALLY_LOG_FORMAT") {
            match format.parse() {
                Ok(f) => self.logging.format = f,
                Err(e) => tracing::warn!("Ignoring TALLY_LOG_FORMAT: {}", e),
            }
        }
    }
}

/// Outcome of a default-location load
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from, `None` for defaults plus environment
    pub source: Option<PathBuf>,
    /// Files that exist but failed to load, in search order
    pub skipped: Vec<ConfigError>,
}

impl LoadedConfig {
    /// Report where the config came from and which files were skipped
    pub fn log(&self) {
        for err in &self.skipped {
            tracing::warn!("Skipping config file: {}", err);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Tally Configuration
#
# Environment variables override these settings:
# - TALLY_API_HOST
# - TALLY_API_PORT
# - TALLY_ENV
# - TALLY_API_BASE_URL
# - TALLY_LOG_LEVEL
# - TALLY_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8000

# Maximum concurrent WebSocket connections
max_ws_connections = 1000

[refresh]
# Timer periods in milliseconds
clock_ms = 1000
kpi_ms = 3000
pipeline_ms = 5000
engineering_ms = 10000
aggregates_ms = 15000

# Wait before the first aggregate refresh (ms)
startup_delay_ms = 300

[client]
# development -> http://localhost:8000
# production  -> https://priyanga.pythonanywhere.com
# Any other name also selects production
environment = "development"

# Explicit base URL, overrides the environment default
# base_url = "http://localhost:8000"

# Request timeout in milliseconds
request_timeout_ms = 10000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
