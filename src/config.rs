//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::client::ClientConfig;
use crate::store::{StoreConfig, DEFAULT_MAX_SESSIONS};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub sessions: SessionsConfig,

    #[serde(default)]
    pub charts: ChartsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard service connection
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means no timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Session list limits
#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
        }
    }
}

/// Where chart data points come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSource {
    /// Canned datasets picked from the chart's type and title
    #[default]
    Mock,
    /// The service's chart-data endpoint, canned data on failure
    Service,
}

impl FromStr for ChartSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ChartSource::Mock),
            "service" => Ok(ChartSource::Service),
            other => Err(format!("Unknown chart source: {}", other)),
        }
    }
}

impl fmt::Display for ChartSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartSource::Mock => write!(f, "mock"),
            ChartSource::Service => write!(f, "service"),
        }
    }
}

/// Chart data configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartsConfig {
    #[serde(default)]
    pub source: ChartSource,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("dashboard-agent").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Load an explicitly named file, or fall back to the default locations
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Settings for the HTTP client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.service.base_url.clone(),
            request_timeout: self.service.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Settings for the session store
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            max_sessions: self.sessions.max_sessions,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Service overrides
        if let Some(url) = var("DASHBOARD_AGENT_URL") {
            self.service.base_url = url;
        }
        if let Some(secs) = var("DASHBOARD_AGENT_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.service.request_timeout_secs = Some(s);
            }
        }

        // Session overrides
        if let Some(max) = var("DASHBOARD_AGENT_MAX_SESSIONS") {
            if let Ok(m) = max.parse() {
                self.sessions.max_sessions = m;
            }
        }

        // Chart overrides
        if let Some(source) = var("DASHBOARD_AGENT_CHART_SOURCE") {
            match source.parse() {
                Ok(s) => self.charts.source = s,
                Err(e) => tracing::warn!("Ignoring DASHBOARD_AGENT_CHART_SOURCE: {}", e),
            }
        }

        // Logging overrides
        if let Some(level) = var("DASHBOARD_AGENT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("DASHBOARD_AGENT_LOG_FORMAT") {
            self.logging.format = format;
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
    r#"# Dashboard Agent Configuration
#
# Environment variables override these settings:
# - DASHBOARD_AGENT_URL
# - DASHBOARD_AGENT_TIMEOUT_SECS
# - DASHBOARD_AGENT_MAX_SESSIONS
# - DASHBOARD_AGENT_CHART_SOURCE
# - DASHBOARD_AGENT_LOG_LEVEL
# - DASHBOARD_AGENT_LOG_FORMAT

[service]
# Dashboard service URL
base_url = "http://localhost:8080"

# Request timeout in seconds (unset waits indefinitely)
# request_timeout_secs = 120

[sessions]
# Sessions kept in the sidebar; the oldest is dropped past this
max_sessions = 3

[charts]
# Chart data source: mock (canned datasets) or service
source = "mock"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/dashboard-agent/agent.log"
"#
    .to_string()
}
