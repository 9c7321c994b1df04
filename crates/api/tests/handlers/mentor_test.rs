use axum::http::StatusCode;
use mentorbook_core::models::mentor::MentorResponse;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, actor_header, actor_value};

#[tokio::test]
async fn test_register_and_get_mentor() {
    let ctx = TestContext::new();
    let user = Uuid::new_v4();

    let created = ctx
        .server
        .post("/api/mentors")
        .add_header(actor_header(), actor_value(user))
        .json(&json!({
            "display_name": "  Katherine Johnson ",
            "specialties": ["orbital mechanics", "geometry"],
            "bio": "Computes trajectories"
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let mentor = created.json::<MentorResponse>().mentor;
    assert_eq!(mentor.id, user);
    assert_eq!(mentor.display_name, "Katherine Johnson");
    assert_eq!(mentor.total_sessions, 0);

    let fetched = ctx.server.get(&format!("/api/mentors/{}", user)).await;
    fetched.assert_status(StatusCode::OK);
    assert_eq!(fetched.json::<MentorResponse>().mentor, mentor);
}

#[tokio::test]
async fn test_register_twice() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;

    let response = ctx
        .server
        .post("/api/mentors")
        .add_header(actor_header(), actor_value(mentor))
        .json(&json!({ "display_name": "Again" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "validation");
}

#[tokio::test]
async fn test_register_blank_name() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/mentors")
        .add_header(actor_header(), actor_value(Uuid::new_v4()))
        .json(&json!({ "display_name": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_oversized_name() {
    let ctx = TestContext::new();
    let user = Uuid::new_v4();

    let response = ctx
        .server
        .post("/api/mentors")
        .add_header(actor_header(), actor_value(user))
        .json(&json!({ "display_name": "n".repeat(256) }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "validation");
    ctx.server
        .get(&format!("/api/mentors/{}", user))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_unknown_mentor() {
    let ctx = TestContext::new();
    let id = Uuid::new_v4();

    let response = ctx.server.get(&format!("/api/mentors/{}", id)).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "not_found");
    assert!(body["error"].as_str().unwrap().contains(&id.to_string()));
}
