//! Metric names and their descriptions.
//!
//! Counters are emitted through the `metrics` facade. Without an installed recorder
//! they are no-ops; the binary embedding or deploying the service installs the
//! exporter of its choice (Prometheus, StatsD, ...) before calling [`describe_metrics`].

use std::sync::Once;

use metrics::{Unit, describe_counter};

/// Redirect lookups by the tier that answered, label `tier`.
pub const RESOLUTIONS_TOTAL: &str = "smollink_resolutions_total";
/// Links successfully created.
pub const LINKS_CREATED_TOTAL: &str = "smollink_links_created_total";
/// Requests rejected by a rate limiter, label `scope`.
pub const RATE_LIMITED_TOTAL: &str = "smollink_rate_limited_total";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Registers units and help texts with the installed recorder. Runs once per process.
pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            RESOLUTIONS_TOTAL,
            Unit::Count,
            "Shortlink resolutions by answering tier (local, distributed, store, not_found, disabled)."
        );
        describe_counter!(
            LINKS_CREATED_TOTAL,
            Unit::Count,
            "Total number of shortlinks created."
        );
        describe_counter!(
            RATE_LIMITED_TOTAL,
            Unit::Count,
            "Requests rejected by a rate limiter, by scope."
        );
    });
}
