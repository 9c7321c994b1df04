use axum::{
    body::to_bytes,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
};
use mentorbook_api::middleware::error_handling::AppError;
use mentorbook_core::errors::MentorError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, actor_header, actor_value};

async fn render(err: MentorError) -> (StatusCode, Value) {
    let response = AppError(err).into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[rstest]
#[case(MentorError::NotFound("Session".into()), StatusCode::NOT_FOUND)]
#[case(MentorError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case(MentorError::SelfBookingNotAllowed, StatusCode::BAD_REQUEST)]
#[case(MentorError::PastDateNotAllowed, StatusCode::BAD_REQUEST)]
#[case(MentorError::InvalidDuration, StatusCode::BAD_REQUEST)]
#[case(MentorError::AlreadyFinalized("cancelled".into()), StatusCode::BAD_REQUEST)]
#[case(MentorError::Unauthorized("not yours".into()), StatusCode::FORBIDDEN)]
#[case(MentorError::SlotConflict, StatusCode::CONFLICT)]
#[tokio::test]
async fn test_expected_errors_keep_their_message(#[case] err: MentorError, #[case] expected: StatusCode) {
    let message = err.to_string();
    let kind = err.kind();

    let (status, body) = render(err).await;

    assert_eq!(status, expected);
    assert_eq!(body, json!({ "error": message, "kind": kind }));
}

#[test_log::test(tokio::test)]
async fn test_database_errors_are_hidden() {
    let err = MentorError::Database(eyre::eyre!("connection reset by peer"));

    let (status, body) = render(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error", "kind": "database" }));
}

#[tokio::test]
async fn test_eyre_report_maps_to_database_error() {
    let err = AppError::from(eyre::eyre!("pool timed out"));

    assert!(matches!(err.0, MentorError::Database(_)));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_missing_actor_header() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/bookings").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "unauthenticated");
}

#[tokio::test]
async fn test_malformed_actor_header() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/bookings")
        .add_header(actor_header(), HeaderValue::from_static("not-a-uuid"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"],
        "X-User-Id header must be a UUID"
    );
}

#[tokio::test]
async fn test_malformed_json_body_uses_error_shape() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;

    let response = ctx
        .server
        .post(&format!("/api/mentors/{}/bookings", mentor))
        .add_header(actor_header(), actor_value(Uuid::new_v4()))
        .json(&json!({ "start_at": "tomorrow", "subject": "Optics" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "validation");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_query_uses_error_shape() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;

    let response = ctx
        .server
        .get(&format!("/api/mentors/{}/slots", mentor))
        .add_query_param("days", -1)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "validation");
}

#[tokio::test]
async fn test_malformed_path_id_uses_error_shape() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/mentors/not-a-uuid").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "validation");
}
