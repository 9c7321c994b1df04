use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_version() {
    let ctx = TestContext::new();

    let body = ctx.server.get("/version").await.json::<Value>();

    assert_eq!(body["name"], "mentorbook-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
