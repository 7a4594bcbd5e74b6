//! Binance Ticker Scraper - Main Library
//!
//! This crate provides the main library for the ticker scraper binary,
//! following Clean Architecture principles.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, runners)
//! - **tickers**: Core logic (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust,ignore
//! use binance_scraper::bin_common::{load_config_from_env, ConfigType};
//! use binance_scraper::tickers::ScraperApp;
//! ```

// Re-export workspace libraries for convenience
pub use tickers;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables
    //!
    //! Provides shared functionality for the presentation layer (binaries)
    //! following Clean Architecture principles.

    pub mod cli;
    pub mod runner;

    pub use cli::{load_config_from_env, parse_args, ConfigType};
    pub use runner::{BinaryRunner, RunConfig};
}
