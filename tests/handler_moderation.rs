mod common;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::Value;
use smollink::application::services::{RateLimitPolicy, Resolution};
use smollink::domain::entities::Link;

fn link(id: &str, url: &str) -> Link {
    Link::new(id.to_string(), url.to_string(), None, Utc::now())
}

#[tokio::test]
async fn test_disable_with_reason() {
    let app = common::spawn_app();
    app.links.insert(link("mod0001", "https://example.com"));

    let response = app
        .server
        .patch("/sh/disable/mod0001")
        .add_query_param("reason", "phishing")
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["result"], "Disabled mod0001 for phishing.");

    let stored = app.links.get("mod0001").unwrap();
    assert!(stored.disabled);
    assert_eq!(stored.disabled_reason.as_deref(), Some("phishing"));
}

#[tokio::test]
async fn test_disable_without_reason_stores_default() {
    let app = common::spawn_app();
    app.links.insert(link("mod0002", "https://example.com"));

    let response = app.server.patch("/sh/disable/mod0002").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["result"], "Disabled mod0002.");
    assert_eq!(
        app.links.get("mod0002").unwrap().disabled_reason.as_deref(),
        Some("No reason provided.")
    );
}

#[tokio::test]
async fn test_disable_empty_reason_counts_as_missing() {
    let app = common::spawn_app();
    app.links.insert(link("mod0003", "https://example.com"));

    let response = app
        .server
        .patch("/sh/disable/mod0003")
        .add_query_param("reason", "")
        .await;

    let json: Value = response.json();
    assert_eq!(json["result"], "Disabled mod0003.");
}

#[tokio::test]
async fn test_disable_unknown_id_is_not_found() {
    let app = common::spawn_app();

    let response = app.server.patch("/sh/disable/nothere").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_disable_invalidates_cached_redirect() {
    let app = common::spawn_app();
    app.links.insert(link("mod0004", "https://example.com"));

    app.server
        .get("/mod0004")
        .await
        .assert_status(StatusCode::FOUND);
    assert!(app.cache.get("mod0004").is_some());

    app.server
        .patch("/sh/disable/mod0004")
        .add_query_param("reason", "malware")
        .await
        .assert_status_ok();

    assert!(app.cache.get("mod0004").is_none());

    let response = app.server.get("/mod0004").await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert!(response.text().contains("malware"));
}

#[tokio::test]
async fn test_disable_aborts_when_cache_cannot_be_invalidated() {
    let app = common::spawn_app();
    app.links.insert(link("mod0005", "https://example.com"));
    app.cache.set_unavailable(true);

    let response = app.server.patch("/sh/disable/mod0005").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["error"], "Internal server error");
    assert!(!app.links.get("mod0005").unwrap().disabled);
}

#[tokio::test]
async fn test_delete_then_resolve_is_not_found() {
    let app = common::spawn_app();
    app.links.insert(link("mod0006", "https://example.com"));

    app.server
        .get("/mod0006")
        .await
        .assert_status(StatusCode::FOUND);

    let response = app.server.delete("/sh/remove/mod0006").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["result"], "Deleted mod0006.");

    assert_eq!(
        app.state.resolution_service.resolve("mod0006").await.unwrap(),
        Resolution::NotFound
    );
    app.server.get("/mod0006").await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = common::spawn_app();

    for _ in 0..2 {
        let response = app.server.delete("/sh/remove/ghost01").await;
        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["result"], "Deleted ghost01.");
    }
}

#[tokio::test]
async fn test_clear_local_cache() {
    let app = common::spawn_app();
    app.links.insert(link("mod0007", "https://example.com"));
    app.server
        .get("/mod0007")
        .await
        .assert_status(StatusCode::FOUND);

    let response = app.server.delete("/sh/cache").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["result"], "Cleared 1 cached links.");
}

#[tokio::test]
async fn test_anarchy_disables_moderation_routes() {
    let app = common::spawn_app_with(common::anarchy_settings(), RateLimitPolicy::default());
    app.links.insert(link("mod0008", "https://example.com"));

    let requests = [
        app.server.patch("/sh/disable/mod0008").await,
        app.server.delete("/sh/remove/mod0008").await,
        app.server.delete("/sh/cache").await,
    ];

    for response in requests {
        response.assert_status(StatusCode::UNAUTHORIZED);
        let json: Value = response.json();
        assert_eq!(json["error"], "This route is not available!");
    }

    let stored = app.links.get("mod0008").unwrap();
    assert!(!stored.disabled);
}
