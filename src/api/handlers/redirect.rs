//! Handler for shortlink redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::application::services::Resolution;
use crate::application::services::moderation_service::DEFAULT_DISABLE_REASON;
use crate::state::AppState;
use crate::web::pages::{ErrorPage, SERVER_ERROR_MESSAGE};

pub const NOT_FOUND_MESSAGE: &str = "SmolLink not found.";

/// Redirects a shortlink id to its destination.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// # Responses
///
/// - **302 Found** with `Location` set to the destination
/// - **404** HTML page if the id is unknown
/// - **403** HTML page if the link was disabled, including the reason
/// - **500** HTML page if the store cannot be reached
///
/// Browsers follow this route directly, so failures render a page instead of JSON.
pub async fn redirect_handler(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    let app_name = state.settings.app_name.as_str();

    match state.resolution_service.resolve(&id).await {
        Ok(Resolution::Redirect(url)) => found(app_name, &url),
        Ok(Resolution::NotFound) => {
            ErrorPage::respond(app_name, StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
        }
        Ok(Resolution::Disabled { reason }) => ErrorPage::respond(
            app_name,
            StatusCode::FORBIDDEN,
            disabled_message(app_name, reason.as_deref()),
        ),
        Err(e) => {
            error!(id = %id, error = ?e, "Failed to resolve shortlink");
            ErrorPage::respond(
                app_name,
                StatusCode::INTERNAL_SERVER_ERROR,
                SERVER_ERROR_MESSAGE,
            )
        }
    }
}

pub fn disabled_message(app_name: &str, reason: Option<&str>) -> String {
    format!(
        "This SmolLink has been disabled due to a violation in {}'s Terms of Use.\n{}",
        app_name,
        reason.unwrap_or(DEFAULT_DISABLE_REASON)
    )
}

fn found(app_name: &str, url: &str) -> Response {
    match HeaderValue::from_str(url) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            error!(url = %url, "Stored destination is not a valid Location header: {}", e);
            ErrorPage::respond(
                app_name,
                StatusCode::INTERNAL_SERVER_ERROR,
                SERVER_ERROR_MESSAGE,
            )
        }
    }
}
