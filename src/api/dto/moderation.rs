//! DTOs for the moderation endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};

/// Query string of `PATCH /sh/disable/{id}`.
///
/// An empty `reason=` is treated the same as a missing one.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct DisableQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub reason: Option<String>,
}

/// Result message of a moderation action.
#[derive(Debug, Serialize)]
pub struct ModerationResponse {
    pub result: String,
}

impl ModerationResponse {
    pub fn disabled(id: &str, reason: Option<&str>) -> Self {
        let result = match reason {
            Some(reason) => format!("Disabled {} for {}.", id, reason),
            None => format!("Disabled {}.", id),
        };
        Self { result }
    }

    pub fn deleted(id: &str) -> Self {
        Self {
            result: format!("Deleted {}.", id),
        }
    }

    pub fn cache_cleared(count: usize) -> Self {
        Self {
            result: format!("Cleared {} cached links.", count),
        }
    }
}
