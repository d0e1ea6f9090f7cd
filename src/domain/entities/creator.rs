//! Creator entity: the client identity links are attributed to.

use chrono::{DateTime, Utc};

/// A client identified by its IP address.
///
/// A disabled creator may not create new links; links it already created are
/// unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub id: i64,
    pub ip_address: String,
    pub disabled: bool,
    pub disabled_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Creator {
    /// Creates an enabled creator record.
    pub fn new(id: i64, ip_address: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            ip_address,
            disabled: false,
            disabled_reason: None,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_starts_enabled() {
        let creator = Creator::new(1, "203.0.113.9".to_string(), Utc::now());

        assert_eq!(creator.ip_address, "203.0.113.9");
        assert!(!creator.disabled);
        assert!(creator.disabled_reason.is_none());
    }
}
