//! Distributed cache trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),

    #[error("Cache operation timed out")]
    Timeout,
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Shared key-value cache mapping shortlink ids to destination URLs.
///
/// Implementations report failures instead of swallowing them; callers decide
/// whether a failure degrades to the next tier (reads, write-through) or aborts the
/// operation (invalidation before a moderation write).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache shared by all instances
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation when Redis is not configured
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the destination URL for a shortlink id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get_url(&self, shortlink_id: &str) -> CacheResult<Option<String>>;

    /// Stores a shortlink mapping.
    ///
    /// Entries carry no TTL unless the implementation was configured with one;
    /// they are removed by explicit invalidation.
    async fn set_url(&self, shortlink_id: &str, redirect_to: &str) -> CacheResult<()>;

    /// Removes a cached mapping. Removing an absent key is not an error.
    async fn invalidate(&self, shortlink_id: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
