//! CLI utilities for binaries
//!
//! Handles configuration path resolution and environment variables
//! for all binary executables.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Scraper configuration (scraper_config.yaml)
    Scraper,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Scraper => "config/scraper_config.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Environment variable that overrides the default path, if any
    pub fn env_var_name(&self) -> Option<&str> {
        match self {
            ConfigType::Scraper => Some("SCRAPER_CONFIG_PATH"),
            ConfigType::Custom(_) => None,
        }
    }
}

/// Load configuration path from environment or use default
///
/// # Arguments
/// * `config_type` - Type of configuration to load
///
/// # Returns
/// Path to the configuration file
///
/// # Examples
/// ```
/// use binance_scraper::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Custom("scraper.yaml".to_string()));
/// assert_eq!(path.to_str(), Some("scraper.yaml"));
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    config_type
        .env_var_name()
        .and_then(|name| std::env::var(name).ok())
        .unwrap_or_else(|| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_type_paths() {
        assert_eq!(ConfigType::Scraper.default_path(), "config/scraper_config.yaml");

        let custom = ConfigType::Custom("custom/path.yaml".to_string());
        assert_eq!(custom.default_path(), "custom/path.yaml");
    }

    #[test]
    fn test_config_type_env_vars() {
        assert_eq!(ConfigType::Scraper.env_var_name(), Some("SCRAPER_CONFIG_PATH"));
        assert_eq!(ConfigType::Custom("x".into()).env_var_name(), None);
    }
}
