//! Integration test: Configuration utilities
//!
//! Tests the bin_common configuration loading functionality.

use binance_scraper::bin_common::{load_config_from_env, ConfigType};
use std::env;

#[test]
fn test_scraper_config_default_and_override() {
    // Both cases in one test; env vars are process-global
    env::remove_var("SCRAPER_CONFIG_PATH");
    let config_path = load_config_from_env(ConfigType::Scraper);
    assert_eq!(config_path.to_str().unwrap(), "config/scraper_config.yaml");

    env::set_var("SCRAPER_CONFIG_PATH", "/etc/scraper/prod.yaml");
    let config_path = load_config_from_env(ConfigType::Scraper);
    assert_eq!(config_path.to_str().unwrap(), "/etc/scraper/prod.yaml");

    env::remove_var("SCRAPER_CONFIG_PATH");
}

#[test]
fn test_custom_config() {
    let custom = ConfigType::Custom("custom/path.yaml".to_string());
    let config_path = load_config_from_env(custom);

    assert_eq!(config_path.to_str().unwrap(), "custom/path.yaml");
}

#[test]
fn test_config_type_env_var_names() {
    assert_eq!(
        ConfigType::Scraper.env_var_name(),
        Some("SCRAPER_CONFIG_PATH")
    );
    assert_eq!(ConfigType::Custom("x.yaml".to_string()).env_var_name(), None);
}

#[test]
fn test_config_type_default_paths() {
    assert_eq!(
        ConfigType::Scraper.default_path(),
        "config/scraper_config.yaml"
    );

    let custom = ConfigType::Custom("test.yaml".to_string());
    assert_eq!(custom.default_path(), "test.yaml");
}
