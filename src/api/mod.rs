//! JSON API and the redirect route.
//!
//! - [`dto`] - Request and response bodies
//! - [`handlers`] - One function per route
//! - [`middleware`] - Content-Type guard, anarchy gate, rate limits, tracing
//! - [`routes`] - Public and moderation routers

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
