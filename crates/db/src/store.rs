//! PostgreSQL implementation of the persistence ports.
//!
//! Writes that must be atomic run in one transaction: booking acceptance
//! holds the mentor's row lock from the overlap read to the insert, status
//! changes hold the session's row lock. Dropping an uncommitted transaction
//! rolls it back, so a failure never leaves a partial booking behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use mentorbook_core::{
    booking,
    errors::{MentorError, MentorResult},
    models::{
        availability::{AvailabilityWindow, AvailabilityWindowRequest},
        booking::{Booking, BookingDraft, BookingStatus, SessionFilter},
        mentor::{Mentor, RegisterMentorRequest},
    },
    notifications::Notification,
    ports::{AvailabilityStore, BookingStore, MentorDirectory, NotificationSink},
};
use uuid::Uuid;

use crate::{
    DbPool,
    models::{DbAvailabilityWindow, DbBooking},
    repositories,
};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn db_error(e: sqlx::Error) -> MentorError {
    MentorError::Database(e.into())
}

fn to_bookings(rows: Vec<DbBooking>) -> Result<Vec<Booking>> {
    rows.into_iter().map(Booking::try_from).collect()
}

fn to_windows(rows: Vec<DbAvailabilityWindow>) -> Result<Vec<AvailabilityWindow>> {
    rows.into_iter().map(AvailabilityWindow::try_from).collect()
}

#[async_trait]
impl MentorDirectory for PgStore {
    async fn get_mentor(&self, mentor_id: Uuid) -> MentorResult<Option<Mentor>> {
        let mentor = repositories::mentor::get_mentor_by_id(&self.pool, mentor_id).await?;
        Ok(mentor.map(Mentor::from))
    }

    async fn create_mentor(&self, mentor_id: Uuid, request: &RegisterMentorRequest) -> MentorResult<Mentor> {
        let created = repositories::mentor::create_mentor(
            &self.pool,
            mentor_id,
            request.display_name.trim(),
            &request.specialties,
            request.bio.as_deref(),
        )
        .await?;

        created
            .map(Mentor::from)
            .ok_or_else(|| MentorError::Validation(format!("User {} is already a mentor", mentor_id)))
    }
}

#[async_trait]
impl AvailabilityStore for PgStore {
    async fn get_windows(&self, mentor_id: Uuid) -> MentorResult<Vec<AvailabilityWindow>> {
        let rows = repositories::availability::get_windows_by_mentor_id(&self.pool, mentor_id).await?;
        Ok(to_windows(rows)?)
    }

    async fn replace_windows(
        &self,
        mentor_id: Uuid,
        windows: &[AvailabilityWindowRequest],
    ) -> MentorResult<Vec<AvailabilityWindow>> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        repositories::availability::delete_windows_by_mentor_id(&mut *tx, mentor_id).await?;

        let mut rows = Vec::with_capacity(windows.len());
        for (position, window) in windows.iter().enumerate() {
            let position = i32::try_from(position)
                .map_err(|_| MentorError::Validation("too many availability windows".to_string()))?;
            rows.push(repositories::availability::create_window(&mut *tx, mentor_id, position, window).await?);
        }

        tx.commit().await.map_err(db_error)?;
        Ok(to_windows(rows)?)
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn get_booking(&self, booking_id: Uuid) -> MentorResult<Option<Booking>> {
        let row = repositories::booking::get_booking_by_id(&self.pool, booking_id).await?;
        Ok(row.map(Booking::try_from).transpose()?)
    }

    async fn blocking_bookings(
        &self,
        mentor_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> MentorResult<Vec<Booking>> {
        let rows = repositories::booking::find_blocking_bookings(&self.pool, mentor_id, from, to).await?;
        Ok(to_bookings(rows)?)
    }

    async fn insert_if_free(&self, draft: &BookingDraft) -> MentorResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        if !repositories::mentor::lock_mentor(&mut *tx, draft.mentor_id).await? {
            return Err(MentorError::NotFound(format!(
                "Mentor with ID {} not found",
                draft.mentor_id
            )));
        }

        let existing = repositories::booking::find_blocking_bookings(
            &mut *tx,
            draft.mentor_id,
            draft.start_at,
            draft.end_at(),
        )
        .await?;
        booking::ensure_no_conflict(draft, &to_bookings(existing)?)?;

        let row = repositories::booking::create_booking(&mut *tx, draft).await?;
        repositories::mentor::increment_total_sessions(&mut *tx, draft.mentor_id).await?;

        tx.commit().await.map_err(db_error)?;
        tracing::debug!("Session inserted: id={}, mentor_id={}", row.id, row.mentor_id);

        Ok(Booking::try_from(row)?)
    }

    async fn transition_status(
        &self,
        booking_id: Uuid,
        actor_id: Uuid,
        target: BookingStatus,
        now: DateTime<Utc>,
    ) -> MentorResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let current = repositories::booking::get_booking_for_update(&mut *tx, booking_id)
            .await?
            .ok_or_else(|| MentorError::NotFound(format!("Session with ID {} not found", booking_id)))?;
        booking::check_transition(&Booking::try_from(current)?, actor_id, target, now)?;

        let updated = repositories::booking::update_booking_status(&mut *tx, booking_id, target).await?;

        tx.commit().await.map_err(db_error)?;
        Ok(Booking::try_from(updated)?)
    }

    async fn list_bookings(&self, filter: &SessionFilter) -> MentorResult<Vec<Booking>> {
        let rows = repositories::booking::list_bookings_for_user(
            &self.pool,
            filter.user_id,
            filter.role,
            filter.status,
        )
        .await?;
        Ok(to_bookings(rows)?)
    }
}

#[async_trait]
impl NotificationSink for PgStore {
    async fn deliver(&self, notifications: &[Notification]) -> MentorResult<()> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        for notification in notifications {
            repositories::notification::create_notification(&mut *tx, notification).await?;
        }
        tx.commit().await.map_err(db_error)?;
        Ok(())
    }
}
