mod common;

use axum::http::StatusCode;
use serde_json::Value;
use smollink::application::services::RateLimitPolicy;

#[tokio::test]
async fn test_status_reports_service_info() {
    let app = common::spawn_app();

    let response = app.server.get("/").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["app_name"], "SmolLink");
    assert_eq!(json["anarchy"], false);
    // Looking up the status does not register the caller as a creator.
    assert_eq!(app.creators.len(), 0);
}

#[tokio::test]
async fn test_status_reports_anarchy() {
    let app = common::spawn_app_with(common::anarchy_settings(), RateLimitPolicy::default());

    let json: Value = app.server.get("/").await.json();

    assert_eq!(json["anarchy"], true);
}

#[tokio::test]
async fn test_status_for_banned_creator_is_unauthorized() {
    let app = common::spawn_app();
    app.state
        .moderation_service
        .ban_creator(common::CLIENT_IP, Some("Spam".to_string()))
        .await
        .unwrap();

    let response = app.server.get("/").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let json: Value = response.json();
    assert_eq!(json["error"], "Reason: Spam");
}

#[tokio::test]
async fn test_status_after_unban() {
    let app = common::spawn_app();
    let moderation = &app.state.moderation_service;
    moderation.ban_creator(common::CLIENT_IP, None).await.unwrap();
    moderation.unban_creator(common::CLIENT_IP).await.unwrap();

    app.server.get("/").await.assert_status_ok();
}

#[tokio::test]
async fn test_health_ok() {
    let app = common::spawn_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_when_database_down() {
    let app = common::spawn_app();
    app.links.set_unavailable(true);

    let response = app.server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = response.json();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}

#[tokio::test]
async fn test_health_degraded_when_cache_down() {
    let app = common::spawn_app();
    app.cache.set_unavailable(true);

    let response = app.server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = response.json();
    assert_eq!(json["checks"]["cache"]["status"], "error");
}
