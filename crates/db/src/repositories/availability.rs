use crate::models::DbAvailabilityWindow;
use eyre::Result;
use mentorbook_core::models::availability::AvailabilityWindowRequest;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_window<'e, E: PgExecutor<'e>>(
    executor: E,
    mentor_id: Uuid,
    position: i32,
    window: &AvailabilityWindowRequest,
) -> Result<DbAvailabilityWindow> {
    let id = Uuid::new_v4();

    let window = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        INSERT INTO availability_windows (id, mentor_id, position, day_of_week, start_time, end_time, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, mentor_id, position, day_of_week, start_time, end_time, is_active
        "#,
    )
    .bind(id)
    .bind(mentor_id)
    .bind(position)
    .bind(i16::from(window.day_of_week))
    .bind(window.start_time)
    .bind(window.end_time)
    .bind(window.is_active)
    .fetch_one(executor)
    .await?;

    Ok(window)
}

pub async fn get_windows_by_mentor_id<'e, E: PgExecutor<'e>>(
    executor: E,
    mentor_id: Uuid,
) -> Result<Vec<DbAvailabilityWindow>> {
    let windows = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        SELECT id, mentor_id, position, day_of_week, start_time, end_time, is_active
        FROM availability_windows
        WHERE mentor_id = $1
        ORDER BY position ASC
        "#,
    )
    .bind(mentor_id)
    .fetch_all(executor)
    .await?;

    Ok(windows)
}

pub async fn delete_windows_by_mentor_id<'e, E: PgExecutor<'e>>(executor: E, mentor_id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM availability_windows
        WHERE mentor_id = $1
        "#,
    )
    .bind(mentor_id)
    .execute(executor)
    .await?;

    Ok(())
}

/// Mentors that have never configured a single window.
pub async fn get_mentor_ids_without_windows<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Uuid>> {
    let mentor_ids = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT m.user_id
        FROM mentors m
        WHERE NOT EXISTS (
            SELECT 1 FROM availability_windows w WHERE w.mentor_id = m.user_id
        )
        ORDER BY m.created_at ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(mentor_ids)
}
