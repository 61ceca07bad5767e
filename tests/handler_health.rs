mod common;

#[tokio::test]
async fn test_health_endpoint_success() {
    let ctx = common::create_test_context();

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_click_queue_closed() {
    let ctx = common::create_test_context();
    drop(ctx.click_rx);

    let response = ctx.server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["click_queue"]["status"], "error");
    assert_eq!(json["checks"]["database"]["status"], "ok");
}
