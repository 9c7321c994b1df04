use axum::http::StatusCode;
use mentorbook_core::{
    models::booking::{BookingStatus, SessionResponse, SessionsResponse},
    notifications::NotificationKind,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, actor_header, actor_value, at};

fn booking_body(start: &str) -> Value {
    json!({
        "start_at": start,
        "duration_minutes": 60,
        "subject": "Linear algebra",
        "description": "eigenvalues"
    })
}

async fn book(ctx: &TestContext, student: Uuid, mentor: Uuid, start: &str) -> SessionResponse {
    let response = ctx
        .server
        .post(&format!("/api/mentors/{}/bookings", mentor))
        .add_header(actor_header(), actor_value(student))
        .json(&booking_body(start))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<SessionResponse>()
}

#[tokio::test]
async fn test_book_session_success() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;
    let student = Uuid::new_v4();

    let created = book(&ctx, student, mentor, "2026-03-02T10:00:00Z").await;

    assert_eq!(created.session.mentor_id, mentor);
    assert_eq!(created.session.student_id, student);
    assert_eq!(created.session.start_at, at(2, 10, 0));
    assert_eq!(created.session.status, BookingStatus::Scheduled);

    let kinds: Vec<_> = ctx
        .store
        .delivered_notifications()
        .await
        .into_iter()
        .map(|n| n.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![NotificationKind::SessionBooking, NotificationKind::SessionConfirmation]
    );
}

#[tokio::test]
async fn test_book_overlapping_session_conflicts() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;
    book(&ctx, Uuid::new_v4(), mentor, "2026-03-02T10:00:00Z").await;

    let response = ctx
        .server
        .post(&format!("/api/mentors/{}/bookings", mentor))
        .add_header(actor_header(), actor_value(Uuid::new_v4()))
        .json(&booking_body("2026-03-02T10:30:00Z"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["kind"], "slot_conflict");
}

#[tokio::test]
async fn test_book_in_the_past() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;

    let response = ctx
        .server
        .post(&format!("/api/mentors/{}/bookings", mentor))
        .add_header(actor_header(), actor_value(Uuid::new_v4()))
        .json(&booking_body("2026-02-27T10:00:00Z"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "past_date_not_allowed");
}

#[tokio::test]
async fn test_book_oversized_subject() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;
    let mut body = booking_body("2026-03-02T10:00:00Z");
    body["subject"] = json!("s".repeat(201));

    let response = ctx
        .server
        .post(&format!("/api/mentors/{}/bookings", mentor))
        .add_header(actor_header(), actor_value(Uuid::new_v4()))
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "validation");
    assert!(ctx.store.delivered_notifications().await.is_empty());
}

#[tokio::test]
async fn test_book_self() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;

    let response = ctx
        .server
        .post(&format!("/api/mentors/{}/bookings", mentor))
        .add_header(actor_header(), actor_value(mentor))
        .json(&booking_body("2026-03-02T10:00:00Z"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "self_booking_not_allowed");
}

#[tokio::test]
async fn test_book_unknown_mentor() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post(&format!("/api/mentors/{}/bookings", Uuid::new_v4()))
        .add_header(actor_header(), actor_value(Uuid::new_v4()))
        .json(&booking_body("2026-03-02T10:00:00Z"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_session_and_cancel_again() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;
    let student = Uuid::new_v4();
    let created = book(&ctx, student, mentor, "2026-03-02T09:00:00Z").await;
    let path = format!("/api/bookings/{}/cancel", created.session.id);

    let first = ctx
        .server
        .post(&path)
        .add_header(actor_header(), actor_value(student))
        .await;
    first.assert_status(StatusCode::OK);
    assert_eq!(
        first.json::<SessionResponse>().session.status,
        BookingStatus::Cancelled
    );

    let second = ctx
        .server
        .post(&path)
        .add_header(actor_header(), actor_value(mentor))
        .await;
    second.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(second.json::<Value>()["kind"], "already_finalized");
}

#[tokio::test]
async fn test_cancel_by_outsider_is_forbidden() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;
    let created = book(&ctx, Uuid::new_v4(), mentor, "2026-03-02T09:00:00Z").await;

    let response = ctx
        .server
        .post(&format!("/api/bookings/{}/cancel", created.session.id))
        .add_header(actor_header(), actor_value(Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "unauthorized");
}

#[tokio::test]
async fn test_record_outcome() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;
    let student = Uuid::new_v4();
    let created = book(&ctx, student, mentor, "2026-03-02T09:00:00Z").await;
    let path = format!("/api/bookings/{}/outcome", created.session.id);

    let by_student = ctx
        .server
        .post(&path)
        .add_header(actor_header(), actor_value(student))
        .json(&json!({ "status": "completed" }))
        .await;
    by_student.assert_status(StatusCode::FORBIDDEN);

    let too_early = ctx
        .server
        .post(&path)
        .add_header(actor_header(), actor_value(mentor))
        .json(&json!({ "status": "completed" }))
        .await;
    too_early.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(too_early.json::<Value>()["kind"], "validation");

    ctx.set_now(at(2, 9, 30));
    let by_mentor = ctx
        .server
        .post(&path)
        .add_header(actor_header(), actor_value(mentor))
        .json(&json!({ "status": "no_show" }))
        .await;
    by_mentor.assert_status(StatusCode::OK);
    assert_eq!(
        by_mentor.json::<SessionResponse>().session.status,
        BookingStatus::NoShow
    );
}

#[tokio::test]
async fn test_get_session_only_for_participants() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;
    let student = Uuid::new_v4();
    let created = book(&ctx, student, mentor, "2026-03-02T09:00:00Z").await;
    let path = format!("/api/bookings/{}", created.session.id);

    let own = ctx
        .server
        .get(&path)
        .add_header(actor_header(), actor_value(student))
        .await;
    own.assert_status(StatusCode::OK);
    assert_eq!(own.json::<SessionResponse>().session, created.session);

    let foreign = ctx
        .server
        .get(&path)
        .add_header(actor_header(), actor_value(Uuid::new_v4()))
        .await;
    foreign.assert_status(StatusCode::FORBIDDEN);

    let missing = ctx
        .server
        .get(&format!("/api/bookings/{}", Uuid::new_v4()))
        .add_header(actor_header(), actor_value(student))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_sessions_by_role_and_status() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;
    let student = Uuid::new_v4();
    let early = book(&ctx, student, mentor, "2026-03-02T09:00:00Z").await;
    let late = book(&ctx, student, mentor, "2026-03-02T11:00:00Z").await;
    ctx.server
        .post(&format!("/api/bookings/{}/cancel", early.session.id))
        .add_header(actor_header(), actor_value(student))
        .await
        .assert_status(StatusCode::OK);

    let as_student = ctx
        .server
        .get("/api/bookings")
        .add_header(actor_header(), actor_value(student))
        .await
        .json::<SessionsResponse>();
    assert_eq!(
        as_student.sessions.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![late.session.id, early.session.id]
    );

    let scheduled_for_mentor = ctx
        .server
        .get("/api/bookings")
        .add_query_param("role", "mentor")
        .add_query_param("status", "scheduled")
        .add_header(actor_header(), actor_value(mentor))
        .await
        .json::<SessionsResponse>();
    assert_eq!(
        scheduled_for_mentor.sessions.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![late.session.id]
    );
}
