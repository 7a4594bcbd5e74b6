//! Infrastructure Layer
//!
//! Contains implementations of external interfaces (database, API clients, etc.)
//! This layer depends on the domain layer but not on the application layer.

pub mod client;
pub mod config;
pub mod database;
pub mod logging;

// Re-export client types
pub use client::{binance::BinanceClient, FetchError, MarketDataClient};

// Re-export database types
pub use database::{
    DatabaseError, ObservationRepository, PersistenceError, PgObservationRepository,
    PgSchemaManager, SchemaError, SchemaManager, TickerDatabase,
};

// Re-export config types
pub use config::{ClientConfig, ConfigError, DatabaseConfig, ScraperConfig};

pub use logging::init_tracing_with_level;
