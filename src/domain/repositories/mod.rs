//! Repository trait definitions for the domain layer.
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Shortlink storage and moderation writes
//! - [`CreatorRepository`] - Creator upsert-by-IP and moderation writes

pub mod creator_repository;
pub mod link_repository;

pub use creator_repository::CreatorRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use creator_repository::MockCreatorRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
