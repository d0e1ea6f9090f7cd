//! Utility functions shared across layers.
//!
//! - [`id_generator`] - Random shortlink id generation
//! - [`link_normalizer`] - Link validation and scheme normalization
//! - [`client_ip`] - Client identity from peer address and proxy headers
//! - [`clock`] - Injectable wall clock

pub mod client_ip;
pub mod clock;
pub mod id_generator;
pub mod link_normalizer;
