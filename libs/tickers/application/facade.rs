//! Application Facade
//!
//! Public API for binaries (presentation layer).
//! Wires configuration, database pool, Binance client and polling loop.

use super::polling::{FatalError, PollingLoop};
use crate::infrastructure::{
    init_tracing_with_level, BinanceClient, PgObservationRepository, PgSchemaManager,
    ScraperConfig, TickerDatabase,
};
use std::convert::Infallible;
use std::sync::Arc;

/// Application facade for the ticker scraper
pub struct ScraperApp {
    pub config: ScraperConfig,
    pub database: TickerDatabase,
    pub polling: PollingLoop,
}

impl ScraperApp {
    /// Connect to the database and build the loop. No schema work happens yet.
    pub async fn new(config: ScraperConfig) -> Result<Self, FatalError> {
        let database = TickerDatabase::connect(&config.database).await?;
        let client = BinanceClient::new(&config.client)?;

        let schema = PgSchemaManager::new(
            database.pool().clone(),
            config.symbols.clone(),
            config.timestamp_encoding,
        );
        let repository = PgObservationRepository::new(
            database.pool().clone(),
            config.symbols.clone(),
            config.timestamp_encoding,
        );

        let polling = PollingLoop::new(
            Arc::new(client),
            Arc::new(repository),
            Arc::new(schema),
            &config.symbols,
        );

        Ok(Self {
            config,
            database,
            polling,
        })
    }

    /// Create the tables and poll forever. Only returns on a fatal error.
    pub async fn run(&mut self) -> Result<Infallible, FatalError> {
        self.polling.run().await
    }
}

/// Initialize tracing for binaries with a specific log level
pub fn init_logging_with_level(level: &str) {
    init_tracing_with_level(level);
}
