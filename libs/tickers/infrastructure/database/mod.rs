pub mod repository;
pub mod schema;

use crate::infrastructure::config::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

// Re-export main types
pub use repository::{ObservationRepository, PersistenceError, PgObservationRepository};
pub use schema::{PgSchemaManager, SchemaError, SchemaManager, TableNames};

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

/// How long a persist waits for a free pooled connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection pool to the ticker store
#[derive(Clone)]
pub struct TickerDatabase {
    pool: PgPool,
}

impl TickerDatabase {
    /// Open the connection pool
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!(
            "Connecting to database: {}@{}:{}/{}",
            config.user, config.host, config.port, config.name
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(connect_options(config))
            .await?;

        info!("Database connection pool ready");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connection options, with the statement deadline applied server side
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .password(&config.password)
        .options([(
            "statement_timeout",
            config.statement_timeout.as_millis().to_string(),
        )])
}
