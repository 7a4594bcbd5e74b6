//! Snapshot persistence
//!
//! One snapshot becomes one row in each of the symbol's two tables. Both
//! inserts share a transaction: either both rows are committed or neither is.

use super::schema::TableNames;
use crate::domain::{Symbol, SymbolError, SymbolMap, TickerInfo, TickerSnapshot, TickerValue, TimestampEncoding};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Cannot persist: {0}")]
    UnmappedSymbol(#[from] SymbolError),

    #[error("Timestamp {0} is out of range")]
    InvalidTimestamp(i64),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Durable sink for snapshots
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Store both rows of `snapshot` atomically
    async fn persist(&self, symbol: &Symbol, snapshot: &TickerSnapshot) -> Result<()>;
}

/// Bound value of the `timestamp` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimestampValue {
    Native(NaiveDateTime),
    EpochMillis(i64),
}

impl TimestampValue {
    fn encode(snapshot: &TickerSnapshot, encoding: TimestampEncoding) -> Result<Self> {
        match encoding {
            TimestampEncoding::Native => snapshot
                .naive_utc()
                .map(TimestampValue::Native)
                .ok_or(PersistenceError::InvalidTimestamp(snapshot.timestamp)),
            TimestampEncoding::EpochMillis => Ok(TimestampValue::EpochMillis(snapshot.timestamp)),
        }
    }
}

/// `INSERT` with every value bound as a parameter
fn insert_query(
    table: &str,
    columns: &[&str],
    timestamp: TimestampValue,
    fields: &[Option<Decimal>],
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} (timestamp, {}) VALUES (",
        table,
        columns.join(", ")
    ));

    match timestamp {
        TimestampValue::Native(ts) => builder.push_bind(ts),
        TimestampValue::EpochMillis(ms) => builder.push_bind(ms),
    };

    for field in fields {
        builder.push(", ");
        builder.push_bind(*field);
    }

    builder.push(")");
    builder
}

/// PostgreSQL observation repository
pub struct PgObservationRepository {
    pool: PgPool,
    symbols: SymbolMap,
    encoding: TimestampEncoding,
}

impl PgObservationRepository {
    pub fn new(pool: PgPool, symbols: SymbolMap, encoding: TimestampEncoding) -> Self {
        Self {
            pool,
            symbols,
            encoding,
        }
    }
}

#[async_trait]
impl ObservationRepository for PgObservationRepository {
    async fn persist(&self, symbol: &Symbol, snapshot: &TickerSnapshot) -> Result<()> {
        let key = self.symbols.storage_key(symbol)?;
        let tables = TableNames::for_key(key);
        let timestamp = TimestampValue::encode(snapshot, self.encoding)?;

        let mut value_query = insert_query(
            &tables.value,
            &TickerValue::COLUMNS,
            timestamp,
            &snapshot.value.fields(),
        );
        let mut info_query = insert_query(
            &tables.info,
            &TickerInfo::COLUMNS,
            timestamp,
            &snapshot.info.fields(),
        );

        // Rolled back on drop if either insert fails
        let mut tx = self.pool.begin().await?;
        value_query.build().execute(&mut *tx).await?;
        info_query.build().execute(&mut *tx).await?;
        tx.commit().await?;

        debug!(
            symbol = %symbol,
            timestamp = snapshot.timestamp,
            "Persisted ticker snapshot"
        );

        Ok(())
    }
}
