//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching and rate-limit counters.
//!
//! # Modules
//!
//! - [`cache`] - Local and distributed cache tiers (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`rate_limit`] - Fixed-window counter stores (Redis and in-memory)

pub mod cache;
pub mod persistence;
pub mod rate_limit;
