//! Cache tiers for shortlink resolution.
//!
//! - [`LocalCache`] - per-process map, consulted first
//! - [`CacheService`] - shared key-value tier, with two implementations:
//!   - [`RedisCache`] - production Redis-backed cache
//!   - [`NullCache`] - no-op implementation when Redis is not configured

mod local_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use local_cache::LocalCache;
pub use null_cache::NullCache;
pub use redis_cache::{RedisCache, connect_redis};
pub(crate) use redis_cache::with_timeout;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
