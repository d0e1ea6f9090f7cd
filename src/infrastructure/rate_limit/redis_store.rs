//! Redis-backed rate-limit counters shared by every instance.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tracing::warn;

use super::store::{RateLimitStore, WindowCount};
use crate::infrastructure::cache::{CacheResult, with_timeout};

/// Fixed-window counters stored in Redis.
///
/// One transaction runs `SET key 0 NX PX window`, `INCR` and `PTTL`. The `SET` only
/// creates the key when no window is open, so the expiry is set once by the first
/// request and `INCR` keeps it. The window therefore runs on Redis' clock.
pub struct RedisRateLimitStore {
    client: ConnectionManager,
    op_timeout: Duration,
    key_prefix: String,
}

impl RedisRateLimitStore {
    pub fn new(client: ConnectionManager, op_timeout: Duration) -> Self {
        Self {
            client,
            op_timeout,
            key_prefix: "ratelimit:".to_string(),
        }
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn increment(
        &self,
        key: &str,
        window: Duration,
        _now: Duration,
    ) -> CacheResult<WindowCount> {
        let key = format!("{}{}", self.key_prefix, key);
        let window_ms = window.as_millis().max(1) as u64;
        let mut conn = self.client.clone();

        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("SET")
            .arg(&key)
            .arg(0)
            .arg("NX")
            .arg("PX")
            .arg(window_ms)
            .ignore()
            .incr(&key, 1u64)
            .pttl(&key);

        let (count, ttl_ms) =
            with_timeout(self.op_timeout, pipe.query_async::<(u64, i64)>(&mut conn))
                .await
                .inspect_err(|e| warn!("Redis rate-limit INCR error for {}: {}", key, e))?;

        // A key without expiry can only come from outside this store; treat it as a
        // freshly opened window.
        let resets_in = u64::try_from(ttl_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .map_or(window, Duration::from_millis);

        Ok(WindowCount { count, resets_in })
    }
}
