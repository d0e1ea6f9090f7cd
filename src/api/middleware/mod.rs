//! HTTP middleware for request processing and protection.
//!
//! Provides request guards, rate limiting, and observability middleware.

pub mod anarchy;
pub mod content_type;
pub mod rate_limit;
pub mod tracing;
