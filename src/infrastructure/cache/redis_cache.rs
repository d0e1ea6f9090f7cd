//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Opens a Redis connection manager and validates it with a PING.
///
/// The manager is cheap to clone and is shared between the link cache and the
/// rate-limit store.
///
/// # Errors
///
/// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
/// be established, or the PING fails.
pub async fn connect_redis(redis_url: &str) -> CacheResult<ConnectionManager> {
    let client = Client::open(redis_url).map_err(|e| {
        CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
    })?;

    let manager = ConnectionManager::new(client).await.map_err(|e| {
        CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
    })?;

    let mut test_conn = manager.clone();
    redis::cmd("PING")
        .query_async::<String>(&mut test_conn)
        .await
        .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

    info!("✓ Connected to Redis");

    Ok(manager)
}

/// Runs a Redis command future under a deadline.
pub(crate) async fn with_timeout<T>(
    timeout: Duration,
    fut: impl Future<Output = RedisResult<T>>,
) -> CacheResult<T> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(CacheError::OperationError(e.to_string())),
        Err(_) => Err(CacheError::Timeout),
    }
}

/// Redis cache for shortlink destinations.
///
/// Keys are namespaced as `link:{id}`. Values are plain destination strings.
pub struct RedisCache {
    client: ConnectionManager,
    ttl_seconds: Option<u64>,
    op_timeout: Duration,
    key_prefix: String,
}

impl RedisCache {
    /// Wraps an established connection.
    ///
    /// # Arguments
    ///
    /// - `client` - connection manager from [`connect_redis`]
    /// - `ttl_seconds` - optional expiry for cached entries (`CACHE_TTL_SECONDS`);
    ///   `None` keeps entries until invalidated
    /// - `op_timeout` - deadline for every command (`CACHE_TIMEOUT_MS`)
    pub fn new(client: ConnectionManager, ttl_seconds: Option<u64>, op_timeout: Duration) -> Self {
        Self {
            client,
            ttl_seconds,
            op_timeout,
            key_prefix: "link:".to_string(),
        }
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, shortlink_id: &str) -> String {
        format!("{}{}", self.key_prefix, shortlink_id)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, shortlink_id: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(shortlink_id);
        let mut conn = self.client.clone();

        let value = with_timeout(self.op_timeout, conn.get::<_, Option<String>>(&key))
            .await
            .inspect_err(|e| warn!("Redis GET error for {}: {}", shortlink_id, e))?;

        match &value {
            Some(url) => debug!("Redis HIT: {} -> {}", shortlink_id, url),
            None => debug!("Redis MISS: {}", shortlink_id),
        }

        Ok(value)
    }

    async fn set_url(&self, shortlink_id: &str, redirect_to: &str) -> CacheResult<()> {
        let key = self.build_key(shortlink_id);
        let mut conn = self.client.clone();

        let result = match self.ttl_seconds {
            Some(ttl) => {
                with_timeout(
                    self.op_timeout,
                    conn.set_ex::<_, _, ()>(&key, redirect_to, ttl),
                )
                .await
            }
            None => with_timeout(self.op_timeout, conn.set::<_, _, ()>(&key, redirect_to)).await,
        };

        result.inspect_err(|e| warn!("Redis SET error for {}: {}", shortlink_id, e))?;
        debug!("Redis SET: {} -> {}", shortlink_id, redirect_to);
        Ok(())
    }

    async fn invalidate(&self, shortlink_id: &str) -> CacheResult<()> {
        let key = self.build_key(shortlink_id);
        let mut conn = self.client.clone();

        let deleted = with_timeout(self.op_timeout, conn.del::<_, i32>(&key))
            .await
            .inspect_err(|e| warn!("Redis DEL error for {}: {}", shortlink_id, e))?;

        if deleted > 0 {
            debug!("Redis INVALIDATE: {}", shortlink_id);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        with_timeout(
            self.op_timeout,
            redis::cmd("PING").query_async::<String>(&mut conn),
        )
        .await
        .is_ok()
    }
}
