//! Fixed-window request rate limiting per client identity.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde_json::json;
use tracing::{debug, error};

use crate::error::AppError;
use crate::infrastructure::rate_limit::RateLimitStore;
use crate::telemetry::RATE_LIMITED_TOTAL;
use crate::utils::clock::Clock;

/// Returned when a client exceeds its allowance.
pub const RATE_LIMITED_MESSAGE: &str = "Slow down there..";

/// Requests allowed per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u64,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn new(max_requests: u64, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }
}

impl Default for RateLimitPolicy {
    /// 10 requests per second.
    fn default() -> Self {
        Self::new(10, Duration::from_secs(1))
    }
}

/// Counts requests per identity in fixed windows.
///
/// A window opens with the identity's first request and lasts `policy.window`; the
/// counter key `{scope}:{identity}` expires when it closes. With a shared store every
/// instance agrees on the count.
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
    policy: RateLimitPolicy,
    scope: &'static str,
}

impl RateLimiter {
    pub fn new(
        store: Arc<dyn RateLimitStore>,
        clock: Arc<dyn Clock>,
        policy: RateLimitPolicy,
        scope: &'static str,
    ) -> Self {
        Self {
            store,
            clock,
            policy,
            scope,
        }
    }

    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Records one request from `identity` and checks it against the policy.
    ///
    /// # Errors
    ///
    /// - [`AppError::RateLimited`] once the window's allowance is used up, with the
    ///   seconds until the window closes, rounded up (at least 1)
    /// - [`AppError::Internal`] if the counter store fails
    pub async fn check(&self, identity: &str) -> Result<(), AppError> {
        let key = format!("{}:{}", self.scope, identity);

        let window = self
            .store
            .increment(&key, self.policy.window, self.clock.now())
            .await
            .map_err(|e| {
                error!("Rate limit store failed for {}: {}", key, e);
                AppError::internal(
                    "Rate limit store unavailable",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        if window.count <= self.policy.max_requests {
            return Ok(());
        }

        let retry_after_secs = (window.resets_in.as_millis().div_ceil(1000) as u64).max(1);

        debug!(
            scope = self.scope,
            identity = %identity,
            count = window.count,
            "Rate limit exceeded"
        );
        counter!(RATE_LIMITED_TOTAL, "scope" => self.scope).increment(1);

        Err(AppError::rate_limited(RATE_LIMITED_MESSAGE, retry_after_secs))
    }
}
