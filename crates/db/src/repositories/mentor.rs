use crate::models::DbMentor;
use chrono::Utc;
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

/// Returns `None` when the user already has a mentor profile.
pub async fn create_mentor<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    display_name: &str,
    specialties: &[String],
    bio: Option<&str>,
) -> Result<Option<DbMentor>> {
    let now = Utc::now();

    tracing::debug!("Creating mentor: user_id={}, name={}", user_id, display_name);

    let mentor = sqlx::query_as::<_, DbMentor>(
        r#"
        INSERT INTO mentors (user_id, display_name, specialties, bio, total_sessions, created_at)
        VALUES ($1, $2, $3, $4, 0, $5)
        ON CONFLICT (user_id) DO NOTHING
        RETURNING user_id, display_name, specialties, bio, total_sessions, created_at
        "#,
    )
    .bind(user_id)
    .bind(display_name)
    .bind(specialties)
    .bind(bio)
    .bind(now)
    .fetch_optional(executor)
    .await?;

    Ok(mentor)
}

pub async fn get_mentor_by_id<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<Option<DbMentor>> {
    let mentor = sqlx::query_as::<_, DbMentor>(
        r#"
        SELECT user_id, display_name, specialties, bio, total_sessions, created_at
        FROM mentors
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(mentor)
}

/// Takes the mentor's row lock for the rest of the transaction. Every booking
/// write for the mentor goes through this, which serializes them.
pub async fn lock_mentor<'e, E: PgExecutor<'e>>(executor: E, user_id: Uuid) -> Result<bool> {
    let locked = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT user_id
        FROM mentors
        WHERE user_id = $1
        FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(locked.is_some())
}

pub async fn increment_total_sessions<'e, E: PgExecutor<'e>>(executor: E, user_id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE mentors
        SET total_sessions = total_sessions + 1
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .execute(executor)
    .await?;

    Ok(())
}
