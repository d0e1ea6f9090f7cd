//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod create;
pub mod health;
pub mod moderation;
pub mod redirect;
pub mod status;

pub use create::create_handler;
pub use health::health_handler;
pub use moderation::{clear_cache_handler, disable_handler, remove_handler};
pub use redirect::redirect_handler;
pub use status::status_handler;
