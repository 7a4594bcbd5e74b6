//! Binance Ticker Scraper
//!
//! Polls Binance 24h tickers for a fixed set of trading pairs and stores
//! every observation in PostgreSQL.
//!
//! ## Layers
//!
//! - **domain**: symbols, storage keys and ticker snapshots
//! - **infrastructure**: configuration, logging, Binance client, database
//! - **application**: the polling loop and the facade used by binaries

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used items
pub use application::{
    init_logging_with_level, CycleReport, FatalError, LoopState, PollingLoop, ScraperApp,
};
pub use domain::{
    StorageKey, Symbol, SymbolError, SymbolMap, TickerInfo, TickerSnapshot, TickerValue,
    TimestampEncoding,
};
pub use infrastructure::{
    BinanceClient, ClientConfig, ConfigError, DatabaseConfig, FetchError, MarketDataClient,
    ObservationRepository, PersistenceError, PgObservationRepository, PgSchemaManager,
    SchemaError, SchemaManager, ScraperConfig,
};
