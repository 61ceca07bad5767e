mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_shorten_with_generated_alias() {
    let ctx = common::create_test_context();

    let response = ctx
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/article" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");

    let alias = body["payload"].as_str().unwrap();
    assert_eq!(alias.len(), 6);
    assert_eq!(
        ctx.links.get(alias).unwrap().url,
        "https://example.com/article"
    );
}

#[tokio::test]
async fn test_shorten_with_empty_alias_generates_one() {
    let ctx = common::create_test_context();

    let response = ctx
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "alias": "" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["payload"].as_str().unwrap().len(), 6);
}

#[tokio::test]
async fn test_shorten_with_custom_alias() {
    let ctx = common::create_test_context();

    let response = ctx
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "https://rust-lang.org", "alias": "rust" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["payload"], "rust");
}

#[tokio::test]
async fn test_shorten_duplicate_custom_alias_conflicts() {
    let ctx = common::create_test_context();

    let first = ctx
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "https://first.com", "alias": "promo" }))
        .await;
    assert_eq!(first.status_code(), 201);

    let second = ctx
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "https://second.com", "alias": "promo" }))
        .await;

    assert_eq!(second.status_code(), 409);
    let body: Value = second.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "conflict");
    assert_eq!(body["error"]["details"]["alias"], "promo");

    // The original mapping is untouched.
    assert_eq!(ctx.links.get("promo").unwrap().url, "https://first.com");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let ctx = common::create_test_context();

    let response = ctx
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "not-a-url" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(ctx.links.is_empty());
}

#[tokio::test]
async fn test_shorten_invalid_alias() {
    let ctx = common::create_test_context();

    let response = ctx
        .server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "alias": "no spaces" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_shorten_malformed_body() {
    let ctx = common::create_test_context();

    let response = ctx
        .server
        .post("/api/shorten")
        .content_type("application/json")
        .text("{ not json")
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}
