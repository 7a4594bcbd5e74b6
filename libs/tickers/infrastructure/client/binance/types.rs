//! Binance REST payload types

use crate::domain::{TickerInfo, TickerSnapshot, TickerValue};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

// =============================================================================
// BinanceTicker24h - /api/v3/ticker/24hr
// =============================================================================

/// Raw 24h ticker
///
/// Example JSON:
/// ```json
/// {
///     "symbol": "BTCUSDT",
///     "priceChange": "-94.99999800",
///     "priceChangePercent": "-95.960",
///     "weightedAvgPrice": "0.29628482",
///     "prevClosePrice": "0.10002000",
///     "lastPrice": "4.00000200",
///     "lastQty": "200.00000000",
///     "bidPrice": "4.00000000",
///     "bidQty": "100.00000000",
///     "askPrice": "4.00000200",
///     "askQty": "100.00000000",
///     "openPrice": "99.00000000",
///     "highPrice": "100.00000000",
///     "lowPrice": "0.10000000",
///     "volume": "8913.30000000",
///     "quoteVolume": "15.30000000",
///     "openTime": 1499783499040,
///     "closeTime": 1499869899040,
///     "firstId": 28385,
///     "lastId": 28460,
///     "count": 76
/// }
/// ```
///
/// Prices arrive as strings and ids/times as integers. Both are parsed from
/// their text into `Decimal`, never through `f64`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceTicker24h {
    #[serde(default)]
    pub symbol: String,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub price_change: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub price_change_percent: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub weighted_avg_price: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub prev_close_price: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub last_price: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub last_qty: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub bid_price: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub bid_qty: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub ask_price: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub ask_qty: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub open_price: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub high_price: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub low_price: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub volume: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub quote_volume: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub open_time: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub close_time: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub first_id: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub last_id: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_from_json")]
    pub count: Option<Decimal>,
}

impl BinanceTicker24h {
    /// Convert into a snapshot. The snapshot time is the ticker's `closeTime`;
    /// a ticker without one cannot be stored.
    pub fn into_snapshot(self) -> Result<TickerSnapshot, String> {
        let timestamp = self
            .close_time
            .filter(|t| t.fract().is_zero())
            .and_then(|t| t.to_i64())
            .ok_or_else(|| format!("ticker for {:?} has no usable closeTime", self.symbol))?;

        let value = TickerValue {
            high: self.high_price,
            low: self.low_price,
            bid: self.bid_price,
            bid_volume: self.bid_qty,
            ask: self.ask_price,
            ask_volume: self.ask_qty,
            vwap: self.weighted_avg_price,
            open: self.open_price,
            close: self.last_price,
            last: self.last_price,
            previous_close: self.prev_close_price,
            change: self.price_change,
            percentage: self.price_change_percent,
            base_volume: self.volume,
            quote_volume: self.quote_volume,
        };

        let info = TickerInfo {
            price_change: self.price_change,
            price_change_percent: self.price_change_percent,
            weighted_avg_price: self.weighted_avg_price,
            prev_close_price: self.prev_close_price,
            last_price: self.last_price,
            last_qty: self.last_qty,
            bid_price: self.bid_price,
            bid_qty: self.bid_qty,
            ask_price: self.ask_price,
            ask_qty: self.ask_qty,
            open_price: self.open_price,
            high_price: self.high_price,
            low_price: self.low_price,
            volume: self.volume,
            quote_volume: self.quote_volume,
            open_time: self.open_time,
            close_time: self.close_time,
            first_id: self.first_id,
            last_id: self.last_id,
            count: self.count,
        };

        Ok(TickerSnapshot {
            timestamp,
            value,
            info,
        })
    }
}

// =============================================================================
// BinanceErrorPayload
// =============================================================================

/// Error body returned with non-2xx responses
///
/// Example JSON:
/// ```json
/// {"code": -1121, "msg": "Invalid symbol."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BinanceErrorPayload {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

impl BinanceErrorPayload {
    /// Too much request weight used
    pub const TOO_MANY_REQUESTS: i64 = -1003;
    /// Internal error; unable to process the request
    pub const DISCONNECTED: i64 = -1001;
    /// Timeout waiting for response from backend server
    pub const TIMEOUT: i64 = -1007;
}

fn decimal_from_json<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s,
        // arbitrary_precision keeps the original digits
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(de::Error::custom(format!(
                "expected a decimal string or number, got {}",
                other
            )))
        }
    };

    Decimal::from_str(raw.trim())
        .or_else(|_| Decimal::from_scientific(raw.trim()))
        .map(Some)
        .map_err(|e| de::Error::custom(format!("invalid decimal {:?}: {}", raw, e)))
}
