//! Request pacing
//!
//! Keeps consecutive requests at least `interval` apart, the client-side
//! counterpart of the provider's request weight limits. A zero interval
//! disables pacing.

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::time::Duration;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Spaces out calls to [`Pacer::wait`]
pub struct Pacer {
    limiter: Option<DirectLimiter>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        // One request per period, no burst
        Self {
            limiter: Quota::with_period(interval).map(RateLimiter::direct),
        }
    }

    /// Wait until the next request slot and claim it
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}
