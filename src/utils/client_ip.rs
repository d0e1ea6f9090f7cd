//! Client identity resolution for rate limiting and creator attribution.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Determines the client identity for a request.
///
/// When `behind_proxy` is set and an `X-Forwarded-For` header is present, the first
/// address of its comma-separated list is used. Otherwise the socket peer address is
/// used.
pub fn client_identity(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy && let Some(forwarded) = first_forwarded_for(headers) {
        return forwarded;
    }

    peer.ip().to_string()
}

fn first_forwarded_for(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(X_FORWARDED_FOR)?.to_str().ok()?;
    let first = value.split(',').next()?.trim();

    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}
