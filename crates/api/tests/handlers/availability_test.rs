use axum::http::StatusCode;
use mentorbook_core::{
    models::{availability::AvailabilityWindowsResponse, slot::SlotsResponse},
    service::SchedulingSettings,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, actor_header, actor_value, at};

#[tokio::test]
async fn test_list_slots_around_a_booking() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;
    ctx.server
        .post(&format!("/api/mentors/{}/bookings", mentor))
        .add_header(actor_header(), actor_value(Uuid::new_v4()))
        .json(&json!({
            "start_at": "2026-03-02T10:00:00Z",
            "duration_minutes": 60,
            "subject": "Statistics"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .get(&format!("/api/mentors/{}/slots", mentor))
        .add_query_param("days", 2)
        .add_query_param("duration", 60)
        .await;

    response.assert_status(StatusCode::OK);
    let body = response.json::<SlotsResponse>();
    assert_eq!(body.total, 2);
    assert_eq!(
        body.slots.iter().map(|s| s.start_at).collect::<Vec<_>>(),
        vec![at(2, 9, 0), at(2, 11, 0)]
    );
    assert_eq!(body.slots[0].date, "2026-03-02");
    assert_eq!(body.slots[0].time, "09:00");
    assert_eq!(body.slots[0].day_name, "Monday");
}

#[tokio::test]
async fn test_slot_fields_use_platform_timezone() {
    let settings = SchedulingSettings {
        timezone: chrono_tz::Africa::Lagos,
        ..SchedulingSettings::default()
    };
    let ctx = TestContext::with_settings(settings);
    let mentor = ctx.mentor().await;

    let body = ctx
        .server
        .get(&format!("/api/mentors/{}/slots", mentor))
        .add_query_param("days", 2)
        .add_query_param("duration", 180)
        .await
        .json::<SlotsResponse>();

    // Lagos is UTC+1: 09:00 local is 08:00 UTC.
    assert_eq!(body.total, 1);
    assert_eq!(body.slots[0].start_at, at(2, 8, 0));
    assert_eq!(body.slots[0].time, "09:00");
}

#[tokio::test]
async fn test_list_slots_rejects_bad_query() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;

    let zero_duration = ctx
        .server
        .get(&format!("/api/mentors/{}/slots", mentor))
        .add_query_param("duration", 0)
        .await;
    zero_duration.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(zero_duration.json::<Value>()["kind"], "invalid_duration");

    let too_far = ctx
        .server
        .get(&format!("/api/mentors/{}/slots", mentor))
        .add_query_param("days", 400)
        .await;
    too_far.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(too_far.json::<Value>()["kind"], "validation");
}

#[tokio::test]
async fn test_list_slots_unknown_mentor() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/mentors/{}/slots", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_replace_and_get_windows() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;
    let path = format!("/api/mentors/{}/availability-windows", mentor);

    let replaced = ctx
        .server
        .put(&path)
        .add_header(actor_header(), actor_value(mentor))
        .json(&json!({
            "availabilities": [
                { "day_of_week": 2, "start_time": "14:00", "end_time": "16:30" },
                { "day_of_week": 0, "start_time": "08:00:00", "end_time": "09:00", "is_active": false }
            ]
        }))
        .await;
    replaced.assert_status(StatusCode::OK);

    let fetched = ctx.server.get(&path).await;
    fetched.assert_status(StatusCode::OK);
    let body = fetched.json::<Value>();
    let windows = body["availabilities"].as_array().unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0]["day_of_week"], 2);
    assert_eq!(windows[0]["start_time"], "14:00");
    assert_eq!(windows[0]["end_time"], "16:30");
    assert_eq!(windows[0]["is_active"], true);
    assert_eq!(windows[1]["start_time"], "08:00");
    assert_eq!(windows[1]["is_active"], false);

    let typed = fetched.json::<AvailabilityWindowsResponse>();
    assert!(typed.availabilities.iter().all(|w| w.mentor_id == mentor));
}

#[tokio::test]
async fn test_replace_windows_of_another_mentor_is_forbidden() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;

    let response = ctx
        .server
        .put(&format!("/api/mentors/{}/availability-windows", mentor))
        .add_header(actor_header(), actor_value(Uuid::new_v4()))
        .json(&json!({ "availabilities": [] }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_replace_windows_rejects_inverted_range() {
    let ctx = TestContext::new();
    let mentor = ctx.mentor().await;

    let response = ctx
        .server
        .put(&format!("/api/mentors/{}/availability-windows", mentor))
        .add_header(actor_header(), actor_value(mentor))
        .json(&json!({
            "availabilities": [
                { "day_of_week": 1, "start_time": "12:00", "end_time": "09:00" }
            ]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "validation");
}
