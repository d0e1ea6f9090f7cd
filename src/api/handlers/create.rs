//! Handler for the link creation endpoint.

use axum::{
    Json,
    extract::{ConnectInfo, State, rejection::JsonRejection},
    http::HeaderMap,
};
use std::net::SocketAddr;
use validator::Validate;

use crate::api::dto::create::{CreateRequest, CreateResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_identity;

/// Creates a shortlink for the calling client.
///
/// # Endpoint
///
/// `POST /create`
///
/// # Request Body
///
/// ```json
/// { "link": "example.com/some/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "id": "aB3dE9z" }
/// ```
///
/// # Errors
///
/// - **400** if the link is missing, not URL-shaped or the body is not valid JSON
/// - **403** if the client has been banned from creating links
/// - **429** if the client exceeded its creation allowance (see the route layers)
pub async fn create_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<Json<CreateResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    payload.validate()?;

    let client_ip = client_identity(&headers, addr, state.settings.behind_proxy);

    let link = state
        .link_service
        .create(&client_ip, payload.link.as_deref())
        .await?;

    Ok(Json(CreateResponse { id: link.id }))
}
