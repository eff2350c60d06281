//! Integration tests for the notification transport endpoint.
//!
//! The status contract matters here: the transport treats any non-2xx as
//! "please redeliver", so everything short of an unreadable body must come
//! back 200 even when the envelope is rejected.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{build_test_context, post_text};
use workbroker_cache::CacheLookup;
use workbroker_core::types::{WorkRequest, WorkResponse};

const ENDPOINT: &str = "/api/v1/work-results";

fn request(uuid: &str) -> WorkRequest {
    WorkRequest {
        uuid: uuid.to_string(),
        experiment_id: "e1".to_string(),
        body: serde_json::json!({ "name": "GetEmbedding" }),
        timeout: Utc::now() + Duration::hours(1),
        pagination: None,
    }
}

fn notification_body(uuid: &str) -> String {
    let message = serde_json::to_string(&WorkResponse {
        request: request(uuid),
        results: vec![serde_json::json!({ "gene": "TP53" })],
    })
    .unwrap();

    serde_json::json!({ "Type": "Notification", "Message": message }).to_string()
}

#[tokio::test]
async fn subscription_confirmation_is_fetched_exactly_once() {
    let ctx = build_test_context();
    let body = serde_json::json!({
        "Type": "SubscriptionConfirmation",
        "SubscribeURL": "https://example.com/confirm",
    })
    .to_string();

    let response = post_text(ctx.app.clone(), ENDPOINT, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ctx.confirmer.fetch_count().await, 1);
    assert_eq!(
        ctx.confirmer.urls.lock().await.as_slice(),
        &["https://example.com/confirm".to_string()]
    );
}

#[tokio::test]
async fn unsubscribe_confirmation_is_fetched_exactly_once() {
    let ctx = build_test_context();
    let body = serde_json::json!({
        "Type": "UnsubscribeConfirmation",
        "SubscribeURL": "https://example.com/remove",
    })
    .to_string();

    let response = post_text(ctx.app.clone(), ENDPOINT, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ctx.confirmer.fetch_count().await, 1);
}

#[tokio::test]
async fn valid_notification_is_cached() {
    let ctx = build_test_context();

    let response = post_text(ctx.app.clone(), ENDPOINT, notification_body("r1")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ctx.confirmer.fetch_count().await, 0);

    // The result is now cached under its identity key; a request with a
    // different uuid but the same identity fields hits it.
    let lookup = ctx.state.cache.lookup(&request("r2")).await.unwrap();
    assert!(matches!(lookup, CacheLookup::Hit(_)));
}

#[tokio::test]
async fn undecodable_notification_payload_returns_ok_and_is_discarded() {
    let ctx = build_test_context();
    let body = serde_json::json!({
        "Type": "Notification",
        "Message": "not json",
    })
    .to_string();

    let response = post_text(ctx.app.clone(), ENDPOINT, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let lookup = ctx.state.cache.lookup(&request("r1")).await.unwrap();
    assert!(matches!(lookup, CacheLookup::Miss));
}

#[tokio::test]
async fn structurally_invalid_envelope_returns_ok_without_side_effects() {
    let ctx = build_test_context();
    let body = serde_json::json!({ "MessageId": "m1" }).to_string();

    let response = post_text(ctx.app.clone(), ENDPOINT, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ctx.confirmer.fetch_count().await, 0);
}

#[tokio::test]
async fn unknown_envelope_kind_returns_ok_without_side_effects() {
    let ctx = build_test_context();
    let body = serde_json::json!({ "Type": "BrandNewKind" }).to_string();

    let response = post_text(ctx.app.clone(), ENDPOINT, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ctx.confirmer.fetch_count().await, 0);
}

#[tokio::test]
async fn unreadable_body_returns_500() {
    let ctx = build_test_context();

    let response = post_text(ctx.app.clone(), ENDPOINT, "not json at all").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(ctx.confirmer.fetch_count().await, 0);
}

#[tokio::test]
async fn duplicate_notifications_are_tolerated() {
    let ctx = build_test_context();

    for _ in 0..2 {
        let response = post_text(ctx.app.clone(), ENDPOINT, notification_body("r1")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let lookup = ctx.state.cache.lookup(&request("r1")).await.unwrap();
    assert!(matches!(lookup, CacheLookup::Hit(_)));
}
