//! Content-Type guard for JSON endpoints.

use axum::{
    extract::Request,
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

pub const UNSUPPORTED_CONTENT_TYPE_MESSAGE: &str = "Provided Content-Type not supported";

/// Rejects requests whose `Content-Type` is not `application/json`.
///
/// Parameters such as `charset` are ignored; only the media type is compared.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/create", post(create_handler))
///     .route_layer(middleware::from_fn(content_type::require_json));
/// ```
pub async fn require_json(req: Request, next: Next) -> Result<Response, AppError> {
    if !is_json(req.headers()) {
        return Err(AppError::bad_request(UNSUPPORTED_CONTENT_TYPE_MESSAGE));
    }

    Ok(next.run(req).await)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
