//! Common test utilities for ticker scraper integration tests
//!
//! In-memory stand-ins for the client, repository and schema manager, plus
//! helpers for the PostgreSQL-backed tests.

#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{HashMap, VecDeque};
use std::str::FromStr;
use std::sync::Mutex;
use tickers::{
    FetchError, MarketDataClient, ObservationRepository, PersistenceError, SchemaError,
    SchemaManager, Symbol, TickerInfo, TickerSnapshot, TickerValue,
};

/// Connection string for the throwaway test database, if any
pub fn test_database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .ok()
        .filter(|url| !url.is_empty())
}

/// Skip test if no test database is configured
#[macro_export]
macro_rules! skip_if_no_database {
    () => {
        match $crate::common::test_database_url() {
            Some(url) => url,
            None => {
                println!("Skipping test: TEST_DATABASE_URL not set");
                return;
            }
        }
    };
}

pub fn symbol(pair: &str) -> Symbol {
    Symbol::new(pair).unwrap()
}

pub fn dec(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

/// Snapshot with a handful of populated fields and the rest absent
pub fn sample_snapshot(timestamp: i64, last: &str) -> TickerSnapshot {
    TickerSnapshot {
        timestamp,
        value: TickerValue {
            high: Some(dec("43100.50")),
            low: Some(dec("41877.01")),
            bid: Some(dec("42000.10")),
            ask: Some(dec("42000.11")),
            last: Some(dec(last)),
            close: Some(dec(last)),
            percentage: Some(dec("-1.234")),
            base_volume: Some(dec("12345.67890123")),
            ..Default::default()
        },
        info: TickerInfo {
            last_price: Some(dec(last)),
            price_change_percent: Some(dec("-1.234")),
            open_time: Some(Decimal::from(timestamp - 86_400_000)),
            close_time: Some(Decimal::from(timestamp)),
            first_id: Some(Decimal::from(-1)),
            count: Some(Decimal::ZERO),
            ..Default::default()
        },
    }
}

/// Snapshot with every field populated, each with a distinct value and scale
pub fn full_snapshot(timestamp: i64) -> TickerSnapshot {
    TickerSnapshot {
        timestamp,
        value: TickerValue {
            high: Some(dec("42000.5")),
            low: Some(dec("41877.01")),
            bid: Some(dec("42000.10")),
            bid_volume: Some(dec("1.20000000")),
            ask: Some(dec("42000.11")),
            ask_volume: Some(dec("0.00000001")),
            vwap: Some(dec("42311.87654321")),
            open: Some(dec("42523.12")),
            close: Some(dec("42000.11")),
            last: Some(dec("42000.11")),
            previous_close: Some(dec("42523.13")),
            change: Some(dec("-523.01")),
            percentage: Some(dec("-1.234")),
            base_volume: Some(dec("12345.67890123")),
            quote_volume: Some(dec("522300000.12345678")),
        },
        info: TickerInfo {
            price_change: Some(dec("-523.01000000")),
            price_change_percent: Some(dec("-1.234")),
            weighted_avg_price: Some(dec("42311.87654321")),
            prev_close_price: Some(dec("42523.13000000")),
            last_price: Some(dec("42000.11000000")),
            last_qty: Some(dec("0.00150000")),
            bid_price: Some(dec("42000.10000000")),
            bid_qty: Some(dec("1.20000000")),
            ask_price: Some(dec("42000.11000000")),
            ask_qty: Some(dec("0.00000001")),
            open_price: Some(dec("42523.12000000")),
            high_price: Some(dec("42000.50000000")),
            low_price: Some(dec("41877.01000000")),
            volume: Some(dec("12345.67890123")),
            quote_volume: Some(dec("522300000.12345678")),
            open_time: Some(Decimal::from(timestamp - 86_400_000)),
            close_time: Some(Decimal::from(timestamp)),
            first_id: Some(Decimal::from(3_200_000_000_i64)),
            last_id: Some(Decimal::from(3_201_000_000_i64)),
            count: Some(Decimal::from(1_000_001)),
        },
    }
}

// =============================================================================
// FakeClient
// =============================================================================

/// Client that answers from per-symbol scripts
///
/// Each call pops the next scripted response for the symbol. When the script
/// runs out it answers with a sample snapshot.
#[derive(Default)]
pub struct FakeClient {
    scripts: Mutex<HashMap<String, VecDeque<Result<TickerSnapshot, FetchError>>>>,
    calls: Mutex<Vec<Symbol>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, pair: &str, response: Result<TickerSnapshot, FetchError>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(pair.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Symbols requested so far, in request order
    pub fn calls(&self) -> Vec<Symbol> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataClient for FakeClient {
    fn name(&self) -> &str {
        "Fake"
    }

    async fn fetch_snapshot(&self, symbol: &Symbol) -> Result<TickerSnapshot, FetchError> {
        self.calls.lock().unwrap().push(symbol.clone());

        let next = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(symbol.as_str())
            .and_then(|queue| queue.pop_front());

        next.unwrap_or_else(|| Ok(sample_snapshot(1_700_000_000_000, "42000.11")))
    }
}

// =============================================================================
// RecordingRepository
// =============================================================================

/// Repository that keeps persisted snapshots in memory
#[derive(Default)]
pub struct RecordingRepository {
    rows: Mutex<Vec<(Symbol, TickerSnapshot)>>,
    fail_for: Option<String>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every persist for `pair` fails with a database error
    pub fn failing_for(pair: &str) -> Self {
        Self {
            rows: Mutex::default(),
            fail_for: Some(pair.to_string()),
        }
    }

    pub fn rows(&self) -> Vec<(Symbol, TickerSnapshot)> {
        self.rows.lock().unwrap().clone()
    }

    pub fn rows_for(&self, pair: &str) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(symbol, _)| symbol.as_str() == pair)
            .count()
    }
}

#[async_trait]
impl ObservationRepository for RecordingRepository {
    async fn persist(&self, symbol: &Symbol, snapshot: &TickerSnapshot) -> Result<(), PersistenceError> {
        if self.fail_for.as_deref() == Some(symbol.as_str()) {
            return Err(PersistenceError::DatabaseError(sqlx::Error::PoolTimedOut));
        }

        self.rows
            .lock()
            .unwrap()
            .push((symbol.clone(), snapshot.clone()));
        Ok(())
    }
}

// =============================================================================
// FakeSchema
// =============================================================================

/// Schema manager that records calls and optionally fails
#[derive(Default)]
pub struct FakeSchema {
    calls: Mutex<Vec<Vec<Symbol>>>,
    fail: bool,
}

impl FakeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: Mutex::default(),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SchemaManager for FakeSchema {
    async fn ensure_tables(&self, symbols: &[Symbol]) -> Result<(), SchemaError> {
        self.calls.lock().unwrap().push(symbols.to_vec());

        if self.fail {
            return Err(SchemaError::DatabaseError(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}
