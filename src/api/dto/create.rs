//! DTOs for the link creation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum accepted length of a submitted link.
pub const MAX_LINK_LENGTH: u64 = 2048;

/// Request body for `POST /create`.
///
/// `link` is optional at the serde level so a missing field reaches the creation
/// pipeline and gets its own message instead of a generic deserialization error.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateRequest {
    #[validate(length(max = MAX_LINK_LENGTH, message = "Link is too long"))]
    pub link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: String,
}
