//! Rate limiting middleware.
//!
//! - [`create_limit`] - fixed-window allowance for link creation, shared across
//!   instances through the rate-limit store
//! - [`redirect_guard`] / [`redirect_guard_behind_proxy`] - per-process token bucket
//!   against request floods on the redirect route

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_identity;

/// Replenish one redirect token every 10 ms (100 per second).
const REDIRECT_REPLENISH_MS: u64 = 10;
/// Redirect burst per client.
const REDIRECT_BURST: u32 = 200;

/// Applies the creation allowance to the calling client.
///
/// # Errors
///
/// Returns `429 Too Many Requests` with a `Retry-After` header once the client has
/// used up the current window, or `500` if the counter store is unavailable.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/create", post(create_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit::create_limit));
/// ```
pub async fn create_limit(
    State(st): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = client_identity(req.headers(), addr, st.settings.behind_proxy);

    st.create_rate_limiter.check(&identity).await?;

    Ok(next.run(req).await)
}

/// Flood guard for `GET /{id}` keyed by the socket peer address.
///
/// # Limits
///
/// - **Rate**: 100 requests per second
/// - **Burst**: 200 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn redirect_guard()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    guard(PeerIpKeyExtractor)
}

/// Same limits as [`redirect_guard`], keyed by `X-Forwarded-For`, `X-Real-IP` or
/// `Forwarded` before falling back to the peer address. Use only behind a trusted
/// reverse proxy.
pub fn redirect_guard_behind_proxy()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    guard(SmartIpKeyExtractor)
}

fn guard<K>(extractor: K) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(REDIRECT_REPLENISH_MS)
            .burst_size(REDIRECT_BURST)
            .key_extractor(extractor)
            .finish()
            .expect("redirect guard period and burst are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
