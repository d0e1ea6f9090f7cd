//! Handler for the service status endpoint.

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::HeaderMap,
};
use std::net::SocketAddr;

use crate::api::dto::status::StatusResponse;
use crate::application::services::link_service::FORBIDDEN_MESSAGE;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_identity;

/// Reports service information to the caller.
///
/// # Endpoint
///
/// `GET /`
///
/// # Errors
///
/// Returns 401 Unauthorized with `"Reason: {reason}"` if the caller has been banned
/// from creating links.
pub async fn status_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, AppError> {
    let client_ip = client_identity(&headers, addr, state.settings.behind_proxy);

    if let Some(creator) = state.link_service.find_creator(&client_ip).await?
        && creator.disabled
    {
        let message = match creator.disabled_reason {
            Some(reason) => format!("Reason: {}", reason),
            None => FORBIDDEN_MESSAGE.to_string(),
        };
        return Err(AppError::unauthorized(message));
    }

    Ok(Json(StatusResponse {
        app_name: state.settings.app_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        anarchy: state.settings.anarchy,
    }))
}
