//! In-memory implementation of every port, for tests and local runs
//! without PostgreSQL.
//!
//! A single async mutex guards all state, so each operation is linearized
//! against every other one, which is stricter than the per-mentor ordering
//! the booking port requires.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
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
    slots,
};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    mentors: HashMap<Uuid, Mentor>,
    windows: HashMap<Uuid, Vec<AvailabilityWindow>>,
    bookings: Vec<Booking>,
    notifications: Vec<Notification>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification delivered so far, oldest first.
    pub async fn delivered_notifications(&self) -> Vec<Notification> {
        self.state.lock().await.notifications.clone()
    }

    /// Stores a booking as-is, bypassing validation. Used to seed history
    /// such as past or already finalized sessions.
    pub async fn insert_booking(&self, booking: Booking) {
        self.state.lock().await.bookings.push(booking);
    }
}

fn not_found(what: &str, id: Uuid) -> MentorError {
    MentorError::NotFound(format!("{} with ID {} not found", what, id))
}

#[async_trait]
impl MentorDirectory for InMemoryStore {
    async fn get_mentor(&self, mentor_id: Uuid) -> MentorResult<Option<Mentor>> {
        Ok(self.state.lock().await.mentors.get(&mentor_id).cloned())
    }

    async fn create_mentor(&self, mentor_id: Uuid, request: &RegisterMentorRequest) -> MentorResult<Mentor> {
        let mut state = self.state.lock().await;
        if state.mentors.contains_key(&mentor_id) {
            return Err(MentorError::Validation(format!("User {} is already a mentor", mentor_id)));
        }

        let mentor = Mentor {
            id: mentor_id,
            display_name: request.display_name.trim().to_string(),
            specialties: request.specialties.clone(),
            bio: request.bio.clone(),
            total_sessions: 0,
            created_at: Utc::now(),
        };
        state.mentors.insert(mentor_id, mentor.clone());
        Ok(mentor)
    }
}

#[async_trait]
impl AvailabilityStore for InMemoryStore {
    async fn get_windows(&self, mentor_id: Uuid) -> MentorResult<Vec<AvailabilityWindow>> {
        let state = self.state.lock().await;
        Ok(state.windows.get(&mentor_id).cloned().unwrap_or_default())
    }

    async fn replace_windows(
        &self,
        mentor_id: Uuid,
        windows: &[AvailabilityWindowRequest],
    ) -> MentorResult<Vec<AvailabilityWindow>> {
        let stored: Vec<AvailabilityWindow> = windows
            .iter()
            .map(|w| AvailabilityWindow {
                id: Uuid::new_v4(),
                mentor_id,
                day_of_week: w.day_of_week,
                start_time: w.start_time,
                end_time: w.end_time,
                is_active: w.is_active,
            })
            .collect();

        self.state.lock().await.windows.insert(mentor_id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn get_booking(&self, booking_id: Uuid) -> MentorResult<Option<Booking>> {
        let state = self.state.lock().await;
        Ok(state.bookings.iter().find(|b| b.id == booking_id).cloned())
    }

    async fn blocking_bookings(
        &self,
        mentor_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> MentorResult<Vec<Booking>> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|b| b.mentor_id == mentor_id && b.blocks_availability())
            .filter(|b| slots::overlaps(b.start_at, b.end_at(), from, to))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.start_at);
        Ok(bookings)
    }

    async fn insert_if_free(&self, draft: &BookingDraft) -> MentorResult<Booking> {
        let mut state = self.state.lock().await;

        if !state.mentors.contains_key(&draft.mentor_id) {
            return Err(not_found("Mentor", draft.mentor_id));
        }

        let existing: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|b| b.mentor_id == draft.mentor_id)
            .cloned()
            .collect();
        booking::ensure_no_conflict(draft, &existing)?;

        if let Some(mentor) = state.mentors.get_mut(&draft.mentor_id) {
            mentor.total_sessions += 1;
        }

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            mentor_id: draft.mentor_id,
            student_id: draft.student_id,
            start_at: draft.start_at,
            duration_minutes: draft.duration_minutes,
            subject: draft.subject.clone(),
            description: draft.description.clone(),
            status: BookingStatus::Scheduled,
            created_at: now,
            updated_at: now,
        };
        state.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn transition_status(
        &self,
        booking_id: Uuid,
        actor_id: Uuid,
        target: BookingStatus,
        now: DateTime<Utc>,
    ) -> MentorResult<Booking> {
        let mut state = self.state.lock().await;
        let booking = state
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| not_found("Session", booking_id))?;

        booking::check_transition(booking, actor_id, target, now)?;
        booking.status = target;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn list_bookings(&self, filter: &SessionFilter) -> MentorResult<Vec<Booking>> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.start_at.cmp(&a.start_at));
        Ok(bookings)
    }
}

#[async_trait]
impl NotificationSink for InMemoryStore {
    async fn deliver(&self, notifications: &[Notification]) -> MentorResult<()> {
        self.state
            .lock()
            .await
            .notifications
            .extend_from_slice(notifications);
        Ok(())
    }
}
