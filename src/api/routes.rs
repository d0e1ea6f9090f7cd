//! API route configuration.

use crate::api::handlers::{
    clear_cache_handler, create_handler, disable_handler, health_handler, remove_handler,
    status_handler,
};
use crate::api::middleware::{anarchy, content_type, rate_limit};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

/// Public JSON routes.
///
/// # Endpoints
///
/// - `GET  /`        - Service information, 401 for banned creators
/// - `GET  /health`  - Health check: DB, cache
/// - `POST /create`  - Create a shortlink (JSON only, rate limited per client)
pub fn public_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(status_handler))
        .route("/health", get(health_handler))
        .route(
            "/create",
            post(create_handler)
                .route_layer(middleware::from_fn_with_state(
                    state,
                    rate_limit::create_limit,
                ))
                .route_layer(middleware::from_fn(content_type::require_json)),
        )
}

/// Moderation routes, switched off in anarchy mode.
///
/// # Endpoints
///
/// - `DELETE /sh/remove/{id}`  - Delete a shortlink
/// - `PATCH  /sh/disable/{id}` - Disable a shortlink (`?reason=...`)
/// - `DELETE /sh/cache`        - Clear this instance's local cache
pub fn moderation_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/sh/remove/{id}", delete(remove_handler))
        .route("/sh/disable/{id}", patch(disable_handler))
        .route("/sh/cache", delete(clear_cache_handler))
        .route_layer(middleware::from_fn_with_state(state, anarchy::layer))
}
