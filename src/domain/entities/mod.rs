//! Core domain entities.
//!
//! - [`Link`] - A shortlink mapping an id to a destination URL
//! - [`Creator`] - The client (keyed by IP address) that created links
//!
//! Creation input uses a separate struct ([`NewLink`]); creators are only ever
//! created through an idempotent upsert, so they have no input struct.

pub mod creator;
pub mod link;

pub use creator::Creator;
pub use link::{Link, NewLink};
