use crate::models::DbNotification;
use chrono::Utc;
use eyre::Result;
use mentorbook_core::notifications::Notification;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_notification<'e, E: PgExecutor<'e>>(
    executor: E,
    notification: &Notification,
) -> Result<DbNotification> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, DbNotification>(
        r#"
        INSERT INTO notifications (id, user_id, kind, title, message, related_id, is_read, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)
        RETURNING id, user_id, kind, title, message, related_id, is_read, created_at
        "#,
    )
    .bind(id)
    .bind(notification.recipient_id)
    .bind(notification.kind.as_str())
    .bind(&notification.title)
    .bind(&notification.message)
    .bind(notification.related_id)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_notifications_by_user_id<'e, E: PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<Vec<DbNotification>> {
    let notifications = sqlx::query_as::<_, DbNotification>(
        r#"
        SELECT id, user_id, kind, title, message, related_id, is_read, created_at
        FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    Ok(notifications)
}
