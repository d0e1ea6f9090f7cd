//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! cache tiers, validation, and business rules. Services consume repository and
//! cache traits and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::resolution_service::ResolutionService`] - Tiered shortlink lookup
//! - [`services::link_service::LinkService`] - Shortlink creation
//! - [`services::moderation_service::ModerationService`] - Disabling, deleting, creator bans
//! - [`services::rate_limiter::RateLimiter`] - Fixed-window request limits

pub mod services;
