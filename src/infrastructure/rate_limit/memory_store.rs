//! In-process rate-limit counters for single-instance deployments.

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;

use super::store::{RateLimitStore, WindowCount};
use crate::infrastructure::cache::CacheResult;

/// Number of tracked keys above which expired counters are swept.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Counter {
    count: u64,
    /// Clock time at which the window closes.
    closes_at: Duration,
}

/// Counters held in a concurrent map, timed by the caller's clock.
///
/// Used when Redis is not configured. Limits then apply per instance only.
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    counters: DashMap<String, Counter>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sweep(&self, now: Duration) {
        self.counters.retain(|_, c| c.closes_at > now);
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn increment(
        &self,
        key: &str,
        window: Duration,
        now: Duration,
    ) -> CacheResult<WindowCount> {
        if self.counters.len() > SWEEP_THRESHOLD {
            self.sweep(now);
        }

        let fresh = Counter {
            count: 0,
            closes_at: now + window,
        };
        let mut entry = self.counters.entry(key.to_string()).or_insert(fresh);
        if entry.closes_at <= now {
            *entry = fresh;
        }

        entry.count += 1;
        Ok(WindowCount {
            count: entry.count,
            resets_in: entry.closes_at - now,
        })
    }
}
