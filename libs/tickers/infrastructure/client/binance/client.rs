use super::types::{BinanceErrorPayload, BinanceTicker24h};
use crate::domain::{Symbol, TickerSnapshot};
use crate::infrastructure::client::{FetchError, MarketDataClient, Pacer};
use crate::infrastructure::config::ClientConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

const TICKER_24H_PATH: &str = "/api/v3/ticker/24hr";

/// Binance spot REST client
pub struct BinanceClient {
    base_url: String,
    client: Client,
    pacer: Pacer,
}

impl BinanceClient {
    pub const NAME: &'static str = "Binance";

    /// Create new Binance client
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout.min(Duration::from_secs(10)))
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(2)
            .tcp_keepalive(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            pacer: Pacer::new(config.min_request_interval),
        })
    }

    /// Fetch the raw 24h ticker for one pair
    pub async fn get_ticker_24h(&self, symbol: &Symbol) -> Result<BinanceTicker24h, FetchError> {
        let url = format!("{}{}", self.base_url, TICKER_24H_PATH);
        let exchange_id = symbol.exchange_id();

        self.pacer.wait().await;

        debug!("GET {} symbol={}", url, exchange_id);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", exchange_id.as_str())])
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            FetchError::ExchangeRejected(format!("malformed ticker for {}: {}", exchange_id, e))
        })
    }
}

#[async_trait]
impl MarketDataClient for BinanceClient {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch_snapshot(&self, symbol: &Symbol) -> Result<TickerSnapshot, FetchError> {
        self.get_ticker_24h(symbol)
            .await?
            .into_snapshot()
            .map_err(FetchError::ExchangeRejected)
    }
}

/// Map a transport-level failure
fn classify_transport(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else if err.is_decode() {
        FetchError::ExchangeRejected(err.to_string())
    } else {
        FetchError::Unavailable(err.to_string())
    }
}

/// Map a non-success HTTP answer
///
/// Only a Binance error payload with a code outside the throttling and
/// overload set is a rejection. A 4xx without such a payload comes from the
/// edge (WAF, load balancer) and says nothing about the request itself.
fn classify_status(status: StatusCode, body: &str) -> FetchError {
    let payload = serde_json::from_str::<BinanceErrorPayload>(body).ok();
    let message = match &payload {
        Some(p) => format!("{} {} {}", status, p.code, p.msg),
        None => format!("{} {}", status, body),
    };

    if status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::IM_A_TEAPOT
        || status == StatusCode::FORBIDDEN
    {
        return FetchError::RateLimited(message);
    }

    match payload.as_ref().map(|p| p.code) {
        Some(BinanceErrorPayload::TOO_MANY_REQUESTS) => return FetchError::RateLimited(message),
        Some(BinanceErrorPayload::DISCONNECTED) => return FetchError::Unavailable(message),
        Some(BinanceErrorPayload::TIMEOUT) => return FetchError::Timeout(message),
        _ => {}
    }

    if status == StatusCode::REQUEST_TIMEOUT || status == StatusCode::GATEWAY_TIMEOUT {
        FetchError::Timeout(message)
    } else if status.is_server_error() || payload.is_none() {
        FetchError::Unavailable(message)
    } else {
        FetchError::ExchangeRejected(message)
    }
}
