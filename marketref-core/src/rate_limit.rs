//! Fixed-delay rate limiter.
//!
//! The provider documents two ceilings (calls per second and calls per minute).
//! The limiter sleeps a fixed delay after every call, sized so that a strictly
//! sequential caller can never exceed the stricter of the two. There is no call
//! counting and no adaptive backoff.

use std::time::Duration;
use thiserror::Error;

/// Finnhub free-tier ceiling: calls per second.
pub const FINNHUB_CALLS_PER_SECOND: u32 = 30;
/// Finnhub free-tier ceiling: calls per minute.
pub const FINNHUB_CALLS_PER_MINUTE: u32 = 60;

#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("request delay must be a finite, non-negative number of seconds (got {0})")]
    InvalidDelay(f64),
}

/// Sleeps a fixed delay after each outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiter {
    delay: Duration,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A limiter that never sleeps.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Build from a delay in (fractional) seconds.
    pub fn from_secs_f64(secs: f64) -> Result<Self, RateLimitError> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(RateLimitError::InvalidDelay(secs));
        }
        Ok(Self::new(Duration::from_secs_f64(secs)))
    }

    /// Smallest delay that keeps a sequential caller under both ceilings.
    ///
    /// A ceiling of 0 means "unbounded" on that axis.
    pub fn for_ceilings(calls_per_second: u32, calls_per_minute: u32) -> Self {
        let per_second = if calls_per_second == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / calls_per_second as f64)
        };
        let per_minute = if calls_per_minute == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(60.0 / calls_per_minute as f64)
        };
        Self::new(per_second.max(per_minute))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_disabled(&self) -> bool {
        self.delay.is_zero()
    }

    /// Block the calling thread for the configured delay.
    pub fn wait(&self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

impl Default for RateLimiter {
    /// Sized for the Finnhub free tier: one call per second.
    fn default() -> Self {
        Self::for_ceilings(FINNHUB_CALLS_PER_SECOND, FINNHUB_CALLS_PER_MINUTE)
    }
}
