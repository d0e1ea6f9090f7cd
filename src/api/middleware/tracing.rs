//! HTTP request/response tracing middleware.

use axum::body::Body;
use axum::http::{Request, Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, TraceLayer};
use tracing::{Span, info, info_span, warn};

type MakeSpanFn = fn(&Request<Body>) -> Span;
type OnResponseFn = fn(&Response<Body>, Duration, &Span);

pub type HttpTraceLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeSpanFn, DefaultOnRequest, OnResponseFn>;

/// Creates the request tracing layer.
///
/// Every request gets an `INFO` span with its method and path. The query string is
/// left out, so moderation reasons do not end up in access logs. Completion is
/// logged with status and latency; 5xx responses are logged at `WARN`.
///
/// ```text
/// INFO request{method=GET path=/aB3dE9z}: request completed status=302 latency_ms=1
/// WARN request{method=POST path=/create}: request failed status=500 latency_ms=502
/// ```
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/{id}", get(redirect_handler))
///     .layer(tracing::layer());
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpanFn)
        .on_response(on_response as OnResponseFn)
}

fn make_span(req: &Request<Body>) -> Span {
    info_span!("request", method = %req.method(), path = %req.uri().path())
}

fn on_response(res: &Response<Body>, latency: Duration, _span: &Span) {
    let status = res.status().as_u16();
    let latency_ms = latency.as_millis() as u64;

    if res.status().is_server_error() {
        warn!(status, latency_ms, "request failed");
    } else {
        info!(status, latency_ms, "request completed");
    }
}
