//! Gate that switches off moderation routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

pub const UNAVAILABLE_MESSAGE: &str = "This route is not available!";

/// Answers 401 instead of running the route while anarchy mode is on.
///
/// # Example
///
/// ```rust,ignore
/// let moderation = Router::new()
///     .route("/sh/remove/{id}", delete(remove_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), anarchy::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if st.settings.anarchy {
        return Err(AppError::unauthorized(UNAVAILABLE_MESSAGE));
    }

    Ok(next.run(req).await)
}
