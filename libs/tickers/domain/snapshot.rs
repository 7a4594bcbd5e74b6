//! Ticker snapshots
//!
//! A snapshot is one reading of a pair's 24h ticker. It is split the same way
//! it is stored: a unified summary (`TickerValue`) and the provider-native
//! detail (`TickerInfo`). Every numeric field is an exact decimal.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the snapshot timestamp is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampEncoding {
    /// `TIMESTAMP` column holding the UTC date-time
    #[default]
    Native,
    /// `BIGINT` column holding epoch milliseconds
    EpochMillis,
}

/// One fetched reading of a symbol's market state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerSnapshot {
    /// Epoch milliseconds
    pub timestamp: i64,
    pub value: TickerValue,
    pub info: TickerInfo,
}

impl TickerSnapshot {
    /// Snapshot time as a UTC date-time, `None` if out of chrono's range
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Snapshot time without zone, as stored in `TIMESTAMP` columns
    pub fn naive_utc(&self) -> Option<NaiveDateTime> {
        self.datetime().map(|dt| dt.naive_utc())
    }
}

// =============================================================================
// TickerValue - unified summary
// =============================================================================

/// Unified summary row (`ticker_value_<key>`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerValue {
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub bid: Option<Decimal>,
    pub bid_volume: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub ask_volume: Option<Decimal>,
    pub vwap: Option<Decimal>,
    pub open: Option<Decimal>,
    pub close: Option<Decimal>,
    pub last: Option<Decimal>,
    pub previous_close: Option<Decimal>,
    pub change: Option<Decimal>,
    pub percentage: Option<Decimal>,
    pub base_volume: Option<Decimal>,
    pub quote_volume: Option<Decimal>,
}

impl TickerValue {
    /// Column names, in the order of [`TickerValue::fields`]
    pub const COLUMNS: [&'static str; 15] = [
        "high",
        "low",
        "bid",
        "bid_volume",
        "ask",
        "ask_volume",
        "vwap",
        "open",
        "close",
        "last",
        "previous_close",
        "change",
        "percentage",
        "base_volume",
        "quote_volume",
    ];

    pub fn fields(&self) -> [Option<Decimal>; 15] {
        [
            self.high,
            self.low,
            self.bid,
            self.bid_volume,
            self.ask,
            self.ask_volume,
            self.vwap,
            self.open,
            self.close,
            self.last,
            self.previous_close,
            self.change,
            self.percentage,
            self.base_volume,
            self.quote_volume,
        ]
    }
}

// =============================================================================
// TickerInfo - provider-native detail
// =============================================================================

/// Provider-native detail row (`ticker_info_<key>`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerInfo {
    pub price_change: Option<Decimal>,
    pub price_change_percent: Option<Decimal>,
    pub weighted_avg_price: Option<Decimal>,
    pub prev_close_price: Option<Decimal>,
    pub last_price: Option<Decimal>,
    pub last_qty: Option<Decimal>,
    pub bid_price: Option<Decimal>,
    pub bid_qty: Option<Decimal>,
    pub ask_price: Option<Decimal>,
    pub ask_qty: Option<Decimal>,
    pub open_price: Option<Decimal>,
    pub high_price: Option<Decimal>,
    pub low_price: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub quote_volume: Option<Decimal>,
    pub open_time: Option<Decimal>,
    pub close_time: Option<Decimal>,
    pub first_id: Option<Decimal>,
    pub last_id: Option<Decimal>,
    pub count: Option<Decimal>,
}

impl TickerInfo {
    /// Column names, in the order of [`TickerInfo::fields`]
    pub const COLUMNS: [&'static str; 20] = [
        "price_change",
        "price_change_percent",
        "weighted_avg_price",
        "prev_close_price",
        "last_price",
        "last_qty",
        "bid_price",
        "bid_qty",
        "ask_price",
        "ask_qty",
        "open_price",
        "high_price",
        "low_price",
        "volume",
        "quote_volume",
        "open_time",
        "close_time",
        "first_id",
        "last_id",
        "count",
    ];

    pub fn fields(&self) -> [Option<Decimal>; 20] {
        [
            self.price_change,
            self.price_change_percent,
            self.weighted_avg_price,
            self.prev_close_price,
            self.last_price,
            self.last_qty,
            self.bid_price,
            self.bid_qty,
            self.ask_price,
            self.ask_qty,
            self.open_price,
            self.high_price,
            self.low_price,
            self.volume,
            self.quote_volume,
            self.open_time,
            self.close_time,
            self.first_id,
            self.last_id,
            self.count,
        ]
    }
}
