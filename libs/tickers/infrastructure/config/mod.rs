//! Scraper configuration
//!
//! Database credentials come from the environment (`PG_HOST`, `PG_PORT`,
//! `PG_NAME`, `PG_USER`, `PG_PASS`), everything else from an optional YAML
//! file. The result is one [`ScraperConfig`] built at startup and handed to
//! every constructor.

use crate::domain::{SymbolError, SymbolMap, TimestampEncoding};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Environment variable not found: {0}")]
    EnvVarMissing(String),

    #[error("Environment variable {name} is invalid: {reason}")]
    EnvVarInvalid { name: String, reason: String },

    #[error("Invalid symbol configuration: {0}")]
    Symbol(#[from] SymbolError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub const ENV_PG_HOST: &str = "PG_HOST";
pub const ENV_PG_PORT: &str = "PG_PORT";
pub const ENV_PG_NAME: &str = "PG_NAME";
pub const ENV_PG_USER: &str = "PG_USER";
pub const ENV_PG_PASS: &str = "PG_PASS";

pub const DEFAULT_API_BASE_URL: &str = "https://api.binance.com";

/// Complete scraper configuration
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub database: DatabaseConfig,
    pub client: ClientConfig,
    /// Pairs to poll, in polling order
    pub symbols: SymbolMap,
    pub timestamp_encoding: TimestampEncoding,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

/// PostgreSQL connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub statement_timeout: Duration,
}

// Keeps the password out of logs and panics
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .field("max_connections", &self.max_connections)
            .field("statement_timeout", &self.statement_timeout)
            .finish()
    }
}

/// Market data client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Deadline for a single ticker request
    pub request_timeout: Duration,
    /// Minimum spacing between two consecutive requests
    pub min_request_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(default_request_timeout_ms()),
            min_request_interval: Duration::from_millis(default_min_request_interval_ms()),
        }
    }
}

/// On-disk layout of the optional YAML file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScraperFile {
    #[serde(default = "default_symbols")]
    symbols: Vec<SymbolEntry>,
    #[serde(default = "default_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,
    #[serde(default = "default_min_request_interval_ms")]
    min_request_interval_ms: u64,
    #[serde(default)]
    timestamp_encoding: TimestampEncoding,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
    #[serde(default = "default_statement_timeout_secs")]
    statement_timeout_secs: u64,
}

impl Default for ScraperFile {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            api_base_url: default_api_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            min_request_interval_ms: default_min_request_interval_ms(),
            timestamp_encoding: TimestampEncoding::default(),
            log_level: default_log_level(),
            max_connections: default_max_connections(),
            statement_timeout_secs: default_statement_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SymbolEntry {
    pair: String,
    key: String,
}

fn default_symbols() -> Vec<SymbolEntry> {
    SymbolMap::DEFAULT_PAIRS
        .iter()
        .map(|(pair, key)| SymbolEntry {
            pair: pair.to_string(),
            key: key.to_string(),
        })
        .collect()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_min_request_interval_ms() -> u64 {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_statement_timeout_secs() -> u64 {
    60
}

impl ScraperConfig {
    /// Load configuration from the process environment and the YAML file at
    /// `config_path`. A missing file means all defaults.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();

        let yaml_content = if config_path.exists() {
            info!("Loading configuration from {}", config_path.display());
            Some(std::fs::read_to_string(config_path)?)
        } else {
            None
        };

        Self::from_sources(yaml_content.as_deref(), |name| std::env::var(name).ok())
    }

    /// Build configuration from YAML text and an environment lookup
    pub fn from_sources<F>(yaml: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ScraperFile = match yaml {
            Some(content) if !content.trim().is_empty() => serde_yaml::from_str(content)?,
            _ => ScraperFile::default(),
        };

        let symbols =
            SymbolMap::from_pairs(file.symbols.into_iter().map(|entry| (entry.pair, entry.key)))?;

        let database = DatabaseConfig {
            max_connections: file.max_connections,
            statement_timeout: Duration::from_secs(file.statement_timeout_secs),
            ..DatabaseConfig::from_lookup(env)?
        };

        let config = Self {
            database,
            client: ClientConfig {
                base_url: file.api_base_url.trim_end_matches('/').to_string(),
                request_timeout: Duration::from_millis(file.request_timeout_ms),
                min_request_interval: Duration::from_millis(file.min_request_interval_ms),
            },
            symbols,
            timestamp_encoding: file.timestamp_encoding,
            log_level: file.log_level,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !self.client.base_url.starts_with("http://")
            && !self.client.base_url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(
                "api_base_url must start with http:// or https://".to_string(),
            ));
        }

        if self.client.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "request_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "max_connections must be greater than 0".to_string(),
            ));
        }

        if self.database.statement_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "statement_timeout_secs must be greater than 0".to_string(),
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  Symbols: {}", self.symbols);
        info!("  API base url: {}", self.client.base_url);
        info!("  Request timeout: {:?}", self.client.request_timeout);
        info!("  Min request interval: {:?}", self.client.min_request_interval);
        info!("  Timestamp encoding: {:?}", self.timestamp_encoding);
        info!("  Log level: {}", self.log_level);
        info!(
            "  Database: {}@{}:{}/{}",
            self.database.user, self.database.host, self.database.port, self.database.name
        );
    }
}

impl DatabaseConfig {
    /// Read the connection settings through `lookup`; every variable is required
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::EnvVarMissing(name.to_string()))
        };

        let host = required(ENV_PG_HOST)?;
        let port_raw = required(ENV_PG_PORT)?;
        let name = required(ENV_PG_NAME)?;
        let user = required(ENV_PG_USER)?;
        let password = required(ENV_PG_PASS)?;

        let port = port_raw
            .trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::EnvVarInvalid {
                name: ENV_PG_PORT.to_string(),
                reason: format!("{:?} is not a port number ({})", port_raw, e),
            })?;

        Ok(Self {
            host,
            port,
            name,
            user,
            password,
            max_connections: default_max_connections(),
            statement_timeout: Duration::from_secs(default_statement_timeout_secs()),
        })
    }
}
