//! Links, creators and the storage contracts for them.
//!
//! Nothing here knows about HTTP, Redis or PostgreSQL. The traits in
//! [`repositories`] are implemented in `crate::infrastructure::persistence` and
//! consumed by the services in [`crate::application::services`].
//!
//! A [`entities::Link`] is immutable apart from its moderation state; a
//! [`entities::Creator`] is created on first sight of an IP address and never deleted.

pub mod entities;
pub mod repositories;
