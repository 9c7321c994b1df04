use crate::models::DbBooking;
use chrono::{DateTime, Utc};
use eyre::Result;
use mentorbook_core::models::booking::{BookingDraft, BookingStatus, SessionRole};
use sqlx::PgExecutor;
use uuid::Uuid;

const SESSION_COLUMNS: &str =
    "id, mentor_id, student_id, start_at, duration_minutes, subject, description, status, created_at, updated_at";

pub async fn create_booking<'e, E: PgExecutor<'e>>(executor: E, draft: &BookingDraft) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        INSERT INTO mentor_sessions
            (id, mentor_id, student_id, start_at, duration_minutes, subject, description, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
        RETURNING {SESSION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(draft.mentor_id)
    .bind(draft.student_id)
    .bind(draft.start_at)
    .bind(draft.duration_minutes)
    .bind(&draft.subject)
    .bind(draft.description.as_deref())
    .bind(BookingStatus::Scheduled.as_str())
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(booking)
}

pub async fn get_booking_by_id<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {SESSION_COLUMNS}
        FROM mentor_sessions
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(booking)
}

/// Same as [`get_booking_by_id`] but holds the row lock until the
/// surrounding transaction ends.
pub async fn get_booking_for_update<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {SESSION_COLUMNS}
        FROM mentor_sessions
        WHERE id = $1
        FOR UPDATE
        "#
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(booking)
}

/// Scheduled or completed sessions of the mentor overlapping `[from, to)`.
pub async fn find_blocking_bookings<'e, E: PgExecutor<'e>>(
    executor: E,
    mentor_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {SESSION_COLUMNS}
        FROM mentor_sessions
        WHERE mentor_id = $1
          AND status IN ('scheduled', 'completed')
          AND start_at < $3
          AND start_at + make_interval(mins => duration_minutes) > $2
        ORDER BY start_at ASC
        "#
    ))
    .bind(mentor_id)
    .bind(from)
    .bind(to)
    .fetch_all(executor)
    .await?;

    Ok(bookings)
}

pub async fn update_booking_status<'e, E: PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    status: BookingStatus,
) -> Result<DbBooking> {
    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        UPDATE mentor_sessions
        SET status = $2, updated_at = $3
        WHERE id = $1
        RETURNING {SESSION_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status.as_str())
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(booking)
}

pub async fn list_bookings_for_user<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    role: SessionRole,
    status: Option<BookingStatus>,
) -> Result<Vec<DbBooking>> {
    let party_column = match role {
        SessionRole::Student => "student_id",
        SessionRole::Mentor => "mentor_id",
    };

    let bookings = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {SESSION_COLUMNS}
        FROM mentor_sessions
        WHERE {party_column} = $1
          AND ($2::VARCHAR IS NULL OR status = $2)
        ORDER BY start_at DESC
        "#
    ))
    .bind(user_id)
    .bind(status.map(|s| s.as_str()))
    .fetch_all(executor)
    .await?;

    Ok(bookings)
}
