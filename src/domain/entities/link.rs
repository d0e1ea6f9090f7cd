//! Link entity representing a shortlink.

use chrono::{DateTime, Utc};

/// A shortlink and its moderation state.
///
/// `id` and `redirect_to` never change after creation. `disabled_reason` is only
/// meaningful while `disabled` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: String,
    pub redirect_to: String,
    pub creator_id: Option<i64>,
    pub disabled: bool,
    pub disabled_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates an enabled link.
    pub fn new(
        id: String,
        redirect_to: String,
        creator_id: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            redirect_to,
            creator_id,
            disabled: false,
            disabled_reason: None,
            created_at,
        }
    }

    /// Returns a copy marked as disabled with the given reason.
    pub fn into_disabled(mut self, reason: impl Into<String>) -> Self {
        self.disabled = true;
        self.disabled_reason = Some(reason.into());
        self
    }
}

/// Input data for inserting a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub id: String,
    pub redirect_to: String,
    pub creator_id: Option<i64>,
}
