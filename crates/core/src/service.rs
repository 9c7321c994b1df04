//! Mentorship use cases: availability management, slot listing, booking,
//! cancellation and session queries.
//!
//! The service holds the injected ports and the scheduling settings. Every
//! time-dependent operation takes `now` from the caller so results are
//! reproducible.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    booking,
    errors::{MentorError, MentorResult},
    models::{
        availability::{AvailabilityWindow, AvailabilityWindowRequest},
        booking::{BookSessionRequest, Booking, BookingDraft, BookingStatus, SessionFilter, SessionRole},
        mentor::{Mentor, RegisterMentorRequest},
        slot::Slot,
    },
    notifications::{self, Notification},
    ports::{AvailabilityStore, BookingStore, MentorDirectory, NotificationSink},
    slots::{self, SlotQuery},
};

/// Platform-wide scheduling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingSettings {
    /// Zone in which availability windows are interpreted.
    pub timezone: Tz,
    pub granularity_minutes: i32,
    pub default_horizon_days: u32,
    pub max_horizon_days: u32,
    pub default_session_minutes: i32,
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            granularity_minutes: slots::DEFAULT_GRANULARITY_MINUTES,
            default_horizon_days: slots::DEFAULT_HORIZON_DAYS,
            max_horizon_days: 60,
            default_session_minutes: slots::DEFAULT_SESSION_MINUTES,
        }
    }
}

#[derive(Clone)]
pub struct MentorshipService {
    mentors: Arc<dyn MentorDirectory>,
    availability: Arc<dyn AvailabilityStore>,
    bookings: Arc<dyn BookingStore>,
    notifications: Arc<dyn NotificationSink>,
    settings: SchedulingSettings,
}

impl MentorshipService {
    pub fn new(
        mentors: Arc<dyn MentorDirectory>,
        availability: Arc<dyn AvailabilityStore>,
        bookings: Arc<dyn BookingStore>,
        notifications: Arc<dyn NotificationSink>,
        settings: SchedulingSettings,
    ) -> Self {
        Self {
            mentors,
            availability,
            bookings,
            notifications,
            settings,
        }
    }

    /// Wires every port to one store that implements all of them.
    pub fn from_store<S>(store: Arc<S>, settings: SchedulingSettings) -> Self
    where
        S: MentorDirectory + AvailabilityStore + BookingStore + NotificationSink + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store, settings)
    }

    /// Same store for persistence, separate sink for notifications.
    pub fn with_notifier<S>(
        store: Arc<S>,
        notifications: Arc<dyn NotificationSink>,
        settings: SchedulingSettings,
    ) -> Self
    where
        S: MentorDirectory + AvailabilityStore + BookingStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store, notifications, settings)
    }

    pub fn settings(&self) -> &SchedulingSettings {
        &self.settings
    }

    pub async fn register_mentor(
        &self,
        actor_id: Uuid,
        request: &RegisterMentorRequest,
    ) -> MentorResult<Mentor> {
        request.validate()?;
        let mentor = self.mentors.create_mentor(actor_id, request).await?;
        info!(mentor_id = %mentor.id, "Registered mentor");
        Ok(mentor)
    }

    pub async fn get_mentor(&self, mentor_id: Uuid) -> MentorResult<Mentor> {
        self.mentors
            .get_mentor(mentor_id)
            .await?
            .ok_or_else(|| MentorError::NotFound(format!("Mentor with ID {} not found", mentor_id)))
    }

    pub async fn availability_windows(&self, mentor_id: Uuid) -> MentorResult<Vec<AvailabilityWindow>> {
        self.get_mentor(mentor_id).await?;
        self.availability.get_windows(mentor_id).await
    }

    pub async fn replace_availability_windows(
        &self,
        actor_id: Uuid,
        mentor_id: Uuid,
        windows: &[AvailabilityWindowRequest],
    ) -> MentorResult<Vec<AvailabilityWindow>> {
        if actor_id != mentor_id {
            return Err(MentorError::Unauthorized(
                "only the mentor can change their availability".to_string(),
            ));
        }
        self.get_mentor(mentor_id).await?;
        for window in windows {
            window.validate()?;
        }

        let stored = self.availability.replace_windows(mentor_id, windows).await?;
        info!(%mentor_id, windows = stored.len(), "Replaced availability windows");
        Ok(stored)
    }

    /// Free slots of the mentor. `horizon_days` and `duration_minutes` fall
    /// back to the configured defaults.
    pub async fn list_available_slots(
        &self,
        mentor_id: Uuid,
        horizon_days: Option<u32>,
        duration_minutes: Option<i32>,
        now: DateTime<Utc>,
    ) -> MentorResult<Vec<Slot>> {
        let query = SlotQuery {
            horizon_days: horizon_days.unwrap_or(self.settings.default_horizon_days),
            granularity_minutes: self.settings.granularity_minutes,
            session_duration_minutes: duration_minutes.unwrap_or(self.settings.default_session_minutes),
        };
        query.validate(self.settings.max_horizon_days)?;
        self.get_mentor(mentor_id).await?;

        let windows = self.availability.get_windows(mentor_id).await?;
        if !windows.iter().any(|w| w.is_active) {
            return Ok(Vec::new());
        }

        let (from, to) = query.booking_bounds(now);
        let bookings = self.bookings.blocking_bookings(mentor_id, from, to).await?;
        let slots = slots::list_available_slots(&windows, &bookings, &query, now, &self.settings.timezone);
        debug!(%mentor_id, slots = slots.len(), "Computed available slots");
        Ok(slots)
    }

    pub async fn book_session(
        &self,
        student_id: Uuid,
        mentor_id: Uuid,
        request: &BookSessionRequest,
        now: DateTime<Utc>,
    ) -> MentorResult<Booking> {
        let draft = BookingDraft {
            mentor_id,
            student_id,
            start_at: request.start_at,
            duration_minutes: request
                .duration_minutes
                .unwrap_or(self.settings.default_session_minutes),
            subject: request.subject.trim().to_string(),
            description: request.description.clone(),
        };
        booking::validate_request(&draft, now)?;

        let booking = self.bookings.insert_if_free(&draft).await.inspect_err(|e| {
            if e.is_expected() {
                warn!(%mentor_id, %student_id, start_at = %draft.start_at, kind = e.kind(), "Booking rejected");
            }
        })?;
        info!(booking_id = %booking.id, %mentor_id, %student_id, "Session booked");

        self.notify(&notifications::booking_accepted(&booking, &self.settings.timezone))
            .await;
        Ok(booking)
    }

    pub async fn cancel_session(
        &self,
        booking_id: Uuid,
        actor_id: Uuid,
        now: DateTime<Utc>,
    ) -> MentorResult<Booking> {
        let booking = self
            .bookings
            .transition_status(booking_id, actor_id, BookingStatus::Cancelled, now)
            .await?;
        info!(%booking_id, %actor_id, "Session cancelled");

        self.notify(&[notifications::booking_cancelled(
            &booking,
            actor_id,
            &self.settings.timezone,
        )])
        .await;
        Ok(booking)
    }

    /// Mentor marks a scheduled session as completed or as a no-show.
    pub async fn record_outcome(
        &self,
        booking_id: Uuid,
        actor_id: Uuid,
        status: BookingStatus,
        now: DateTime<Utc>,
    ) -> MentorResult<Booking> {
        if !matches!(status, BookingStatus::Completed | BookingStatus::NoShow) {
            return Err(MentorError::Validation(format!(
                "outcome must be completed or no_show, got {status}"
            )));
        }
        let booking = self
            .bookings
            .transition_status(booking_id, actor_id, status, now)
            .await?;
        info!(%booking_id, %status, "Recorded session outcome");
        Ok(booking)
    }

    pub async fn get_session(&self, booking_id: Uuid, actor_id: Uuid) -> MentorResult<Booking> {
        let booking = self
            .bookings
            .get_booking(booking_id)
            .await?
            .ok_or_else(|| MentorError::NotFound(format!("Session with ID {} not found", booking_id)))?;
        booking::ensure_participant(&booking, actor_id)?;
        Ok(booking)
    }

    pub async fn list_sessions(
        &self,
        actor_id: Uuid,
        role: SessionRole,
        status: Option<BookingStatus>,
    ) -> MentorResult<Vec<Booking>> {
        let filter = SessionFilter {
            user_id: actor_id,
            role,
            status,
        };
        self.bookings.list_bookings(&filter).await
    }

    // The booking is already committed; a failed delivery is logged, not returned.
    async fn notify(&self, batch: &[Notification]) {
        if let Err(e) = self.notifications.deliver(batch).await {
            warn!(error = %e, count = batch.len(), "Failed to deliver notifications");
        }
    }
}
