//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and moderation writes
//! - [`PgCreatorRepository`] - Creator upsert and moderation writes
//!
//! [`TimedLinkRepository`] and [`TimedCreatorRepository`] wrap either one with a
//! per-call time limit.

pub mod pg_creator_repository;
pub mod pg_link_repository;
pub mod timed;

pub use pg_creator_repository::PgCreatorRepository;
pub use pg_link_repository::PgLinkRepository;
pub use timed::{TimedCreatorRepository, TimedLinkRepository};
