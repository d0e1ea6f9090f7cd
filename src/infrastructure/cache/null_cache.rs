//! No-op cache implementation for deployments without Redis.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Every lookup is a miss and every write succeeds, so resolution always falls
/// through to the local cache and the durable store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (distributed cache disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_url(&self, _shortlink_id: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_url(&self, _shortlink_id: &str, _redirect_to: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _shortlink_id: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
