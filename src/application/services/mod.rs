//! Business logic services for the application layer.

pub mod link_service;
pub mod moderation_service;
pub mod rate_limiter;
pub mod resolution_service;

pub use link_service::LinkService;
pub use moderation_service::ModerationService;
pub use rate_limiter::{RateLimitPolicy, RateLimiter};
pub use resolution_service::{Resolution, ResolutionService};
