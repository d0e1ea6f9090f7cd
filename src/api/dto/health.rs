//! DTOs for the health endpoint.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Ok,
    Error,
}

/// `GET /health` body. Served with 503 when `status` is `degraded`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceState,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub cache: CheckStatus,
}

impl HealthChecks {
    pub fn state(&self) -> ServiceState {
        if self.database.is_ok() && self.cache.is_ok() {
            ServiceState::Healthy
        } else {
            ServiceState::Degraded
        }
    }
}

/// Outcome of probing one dependency.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: CheckState,
    pub message: String,
    pub latency_ms: u64,
}

impl CheckStatus {
    pub fn ok(message: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            status: CheckState::Ok,
            message: message.into(),
            latency_ms,
        }
    }

    pub fn error(message: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            status: CheckState::Error,
            message: message.into(),
            latency_ms,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == CheckState::Ok
    }
}
