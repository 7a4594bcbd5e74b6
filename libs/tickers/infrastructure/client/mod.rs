//! Market data clients
//!
//! A [`MarketDataClient`] fetches one snapshot per call and reports failures
//! through the four-way [`FetchError`] taxonomy. It never retries; what to do
//! with a failure is decided by the polling loop.

pub mod binance;
mod pacer;

pub use pacer::Pacer;

use crate::domain::{Symbol, TickerSnapshot};
use async_trait::async_trait;
use thiserror::Error;

/// Classified provider failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request exceeded its deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Provider throttled us (rate limit, DDoS protection)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Provider unreachable or unhealthy
    #[error("Exchange unavailable: {0}")]
    Unavailable(String),

    /// Provider refused the request or answered with something unusable
    #[error("Exchange rejected request: {0}")]
    ExchangeRejected(String),
}

impl FetchError {
    /// Short tag used in log lines
    pub fn tag(&self) -> &'static str {
        match self {
            FetchError::Timeout(_) => "Timeout",
            FetchError::RateLimited(_) => "RateLimited",
            FetchError::Unavailable(_) => "Unavailable",
            FetchError::ExchangeRejected(_) => "ExchangeRejected",
        }
    }

    /// Whether a later cycle can be expected to succeed
    pub fn is_transient(&self) -> bool {
        !matches!(self, FetchError::ExchangeRejected(_))
    }

    pub fn message(&self) -> &str {
        match self {
            FetchError::Timeout(msg)
            | FetchError::RateLimited(msg)
            | FetchError::Unavailable(msg)
            | FetchError::ExchangeRejected(msg) => msg,
        }
    }
}

/// Source of ticker snapshots
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Provider name for log lines
    fn name(&self) -> &str;

    /// Fetch the current snapshot for `symbol`
    async fn fetch_snapshot(&self, symbol: &Symbol) -> Result<TickerSnapshot, FetchError>;
}
