//! Handler for the health endpoint.

use axum::{Json, extract::State, http::StatusCode};
use std::time::Instant;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse, ServiceState};
use crate::state::AppState;

/// Probes the durable store and the distributed cache.
///
/// # Endpoint
///
/// `GET /health`
///
/// Both probes run concurrently. Responds 200 when both pass and 503 otherwise, with
/// the same body either way. Without Redis the cache probe always passes.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (database, cache) = tokio::join!(check_database(&state), check_cache(&state));

    let checks = HealthChecks { database, cache };
    let status = checks.state();
    let code = match status {
        ServiceState::Healthy => StatusCode::OK,
        ServiceState::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks,
    };

    (code, Json(response))
}

async fn check_database(state: &AppState) -> CheckStatus {
    let started = Instant::now();
    let result = state.link_service.ping().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(()) => CheckStatus::ok("Connected", latency_ms),
        Err(e) => {
            tracing::warn!("Health check: database unreachable: {}", e);
            CheckStatus::error("Database unreachable", latency_ms)
        }
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    let started = Instant::now();
    let reachable = state.cache.health_check().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    if reachable {
        CheckStatus::ok("Cache reachable", latency_ms)
    } else {
        CheckStatus::error("Redis connection failed", latency_ms)
    }
}
