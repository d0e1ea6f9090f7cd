//! Counter storage for fixed-window rate limiting.

use async_trait::async_trait;
use std::time::Duration;

use crate::infrastructure::cache::CacheResult;

/// State of a counter right after an increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCount {
    /// Requests counted in the current window, including this one.
    pub count: u64,
    /// Time until the window closes and the counter starts over.
    pub resets_in: Duration,
}

/// Shared counter storage backing the rate limiter.
///
/// A window opens with the first increment of a key and lasts `window`; later
/// increments never extend it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Increments the counter under `key`, opening a new window if none is active.
    ///
    /// `now` is the caller's clock. Stores that keep their own clock (Redis) ignore it.
    async fn increment(&self, key: &str, window: Duration, now: Duration)
    -> CacheResult<WindowCount>;
}
