//! Persistence and delivery interfaces the service depends on.
//!
//! Implementations live in `mentorbook-db`. Each method returns plain
//! records; nothing here traverses relationships.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    errors::MentorResult,
    models::{
        availability::{AvailabilityWindow, AvailabilityWindowRequest},
        booking::{Booking, BookingDraft, BookingStatus, SessionFilter},
        mentor::{Mentor, RegisterMentorRequest},
    },
    notifications::Notification,
};

#[async_trait]
pub trait MentorDirectory: Send + Sync {
    async fn get_mentor(&self, mentor_id: Uuid) -> MentorResult<Option<Mentor>>;

    /// Fails with `Validation` if `mentor_id` already has a profile.
    async fn create_mentor(&self, mentor_id: Uuid, request: &RegisterMentorRequest) -> MentorResult<Mentor>;
}

#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// All windows of the mentor, in declaration order.
    async fn get_windows(&self, mentor_id: Uuid) -> MentorResult<Vec<AvailabilityWindow>>;

    /// Atomically replaces every window of the mentor.
    async fn replace_windows(
        &self,
        mentor_id: Uuid,
        windows: &[AvailabilityWindowRequest],
    ) -> MentorResult<Vec<AvailabilityWindow>>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn get_booking(&self, booking_id: Uuid) -> MentorResult<Option<Booking>>;

    /// Scheduled or completed bookings of the mentor overlapping `[from, to)`.
    async fn blocking_bookings(
        &self,
        mentor_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> MentorResult<Vec<Booking>>;

    /// Inserts the draft as a scheduled booking unless it overlaps an existing
    /// blocking booking of the same mentor.
    ///
    /// The overlap check and the insert form one critical section per mentor:
    /// of two racing overlapping drafts exactly one succeeds and the other
    /// fails with `SlotConflict`. Fails with `NotFound` for an unknown mentor.
    async fn insert_if_free(&self, draft: &BookingDraft) -> MentorResult<Booking>;

    /// Moves a booking to `target` after validating the transition for
    /// `actor_id` at `now` against the current row, atomically.
    async fn transition_status(
        &self,
        booking_id: Uuid,
        actor_id: Uuid,
        target: BookingStatus,
        now: DateTime<Utc>,
    ) -> MentorResult<Booking>;

    /// Matching bookings, newest start first.
    async fn list_bookings(&self, filter: &SessionFilter) -> MentorResult<Vec<Booking>>;
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notifications: &[Notification]) -> MentorResult<()>;
}
