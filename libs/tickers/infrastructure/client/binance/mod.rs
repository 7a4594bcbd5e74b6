//! Binance REST ticker client
//!
//! Fetches the 24h rolling ticker (`GET /api/v3/ticker/24hr`) for one pair
//! per call and converts it into a [`TickerSnapshot`](crate::domain::TickerSnapshot).
//!
//! # Error classification
//!
//! | Provider answer | Outcome |
//! |-----------------|---------|
//! | transport deadline exceeded | `Timeout` |
//! | connection failure | `Unavailable` |
//! | HTTP 403 / 418 / 429, code -1003 | `RateLimited` |
//! | HTTP 408 / 504, code -1007 | `Timeout` |
//! | HTTP 5xx, code -1001 | `Unavailable` |
//! | other 4xx without a Binance error payload | `Unavailable` |
//! | other Binance error code, undecodable 200 body | `ExchangeRejected` |

mod client;
mod types;

pub use client::BinanceClient;
pub use types::{BinanceErrorPayload, BinanceTicker24h};
