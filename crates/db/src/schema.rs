use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create mentors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mentors (
            user_id UUID PRIMARY KEY,
            display_name VARCHAR(255) NOT NULL,
            specialties TEXT[] NOT NULL DEFAULT '{}',
            bio TEXT NULL,
            total_sessions INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create availability_windows table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability_windows (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            mentor_id UUID NOT NULL REFERENCES mentors(user_id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            day_of_week SMALLINT NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT valid_window_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create mentor_sessions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mentor_sessions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            mentor_id UUID NOT NULL REFERENCES mentors(user_id),
            student_id UUID NOT NULL,
            start_at TIMESTAMP WITH TIME ZONE NOT NULL,
            duration_minutes INTEGER NOT NULL,
            subject VARCHAR(200) NOT NULL,
            description TEXT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'scheduled',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration_minutes > 0),
            CONSTRAINT known_status CHECK (status IN ('scheduled', 'completed', 'cancelled', 'no_show'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create notifications table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL,
            kind VARCHAR(50) NOT NULL,
            title VARCHAR(200) NOT NULL,
            message TEXT NOT NULL,
            related_id UUID NULL,
            is_read BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes; several statements, so this goes through the simple protocol
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_availability_windows_mentor_id ON availability_windows(mentor_id, position);
        CREATE INDEX IF NOT EXISTS idx_mentor_sessions_mentor_start ON mentor_sessions(mentor_id, start_at);
        CREATE INDEX IF NOT EXISTS idx_mentor_sessions_student_id ON mentor_sessions(student_id);
        CREATE INDEX IF NOT EXISTS idx_notifications_user_id ON notifications(user_id);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
