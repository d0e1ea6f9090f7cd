//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{id}`     - Shortlink redirect (HTML error pages)
//! - `GET  /`         - Service information
//! - `GET  /health`   - Health check: DB, cache
//! - `POST /create`   - Shortlink creation
//! - `/sh/*`          - Moderation (disabled in anarchy mode)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Flood guard** - Per-IP token bucket on redirects
//! - **Creation limit** - Fixed-window allowance shared across instances
//! - **Content-Type guard** - JSON only on `/create`
//!
//! Trailing slashes are trimmed by the server before routing.

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// Handlers and the rate limiters read the client address from
/// `ConnectInfo<SocketAddr>`, so the router must be served with
/// `into_make_service_with_connect_info`.
pub fn app_router(state: AppState) -> Router {
    let redirect = if state.settings.behind_proxy {
        get(redirect_handler).layer(rate_limit::redirect_guard_behind_proxy())
    } else {
        get(redirect_handler).layer(rate_limit::redirect_guard())
    };

    Router::new()
        .route("/{id}", redirect)
        .merge(api::routes::public_routes(state.clone()))
        .merge(api::routes::moderation_routes(state.clone()))
        .with_state(state)
        .layer(tracing::layer())
}
