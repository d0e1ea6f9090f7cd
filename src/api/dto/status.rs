//! DTO for the service status endpoint.

use serde::Serialize;

/// Public service information returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub app_name: String,
    pub version: String,
    /// True when the moderation routes are disabled.
    pub anarchy: bool,
}
