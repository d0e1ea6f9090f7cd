//! Counter storage for the request rate limiter.
//!
//! - [`RedisRateLimitStore`] - shared counters, limits hold across instances
//! - [`MemoryRateLimitStore`] - per-process counters when Redis is not configured

mod memory_store;
mod redis_store;
mod store;

pub use memory_store::MemoryRateLimitStore;
pub use redis_store::RedisRateLimitStore;
pub use store::{RateLimitStore, WindowCount};

#[cfg(test)]
pub use store::MockRateLimitStore;
