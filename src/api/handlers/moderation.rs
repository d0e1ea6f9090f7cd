//! Handlers for link moderation endpoints.
//!
//! All routes here sit behind [`crate::api::middleware::anarchy`].

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::moderation::{DisableQuery, ModerationResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a shortlink.
///
/// # Endpoint
///
/// `DELETE /sh/remove/{id}`
///
/// Succeeds for unknown ids too.
pub async fn remove_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ModerationResponse>, AppError> {
    state.moderation_service.delete(&id).await?;

    Ok(Json(ModerationResponse::deleted(&id)))
}

/// Disables a shortlink.
///
/// # Endpoint
///
/// `PATCH /sh/disable/{id}?reason=...`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
pub async fn disable_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<DisableQuery>,
) -> Result<Json<ModerationResponse>, AppError> {
    let reason = query.reason.as_deref();

    state.moderation_service.disable(&id, reason).await?;

    Ok(Json(ModerationResponse::disabled(&id, reason)))
}

/// Drops every entry from this instance's local cache.
///
/// # Endpoint
///
/// `DELETE /sh/cache`
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ModerationResponse> {
    let cleared = state.moderation_service.clear_local_cache();

    Json(ModerationResponse::cache_cleared(cleared))
}
