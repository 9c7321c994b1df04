//! Rules for accepting bookings and moving them between statuses.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    errors::{MentorError, MentorResult},
    models::booking::{Booking, BookingDraft, BookingStatus},
    slots,
};

/// Longest accepted session subject, matching the `subject` column.
pub const MAX_SUBJECT_CHARS: usize = 200;

/// Checks a booking request against everything that does not need the
/// mentor's existing sessions. A past start wins over every other problem.
pub fn validate_request(draft: &BookingDraft, now: DateTime<Utc>) -> MentorResult<()> {
    if draft.start_at <= now {
        return Err(MentorError::PastDateNotAllowed);
    }
    if draft.mentor_id == draft.student_id {
        return Err(MentorError::SelfBookingNotAllowed);
    }
    if draft.duration_minutes <= 0 {
        return Err(MentorError::InvalidDuration);
    }
    let subject = draft.subject.trim();
    if subject.is_empty() {
        return Err(MentorError::Validation("subject must not be empty".to_string()));
    }
    if subject.chars().count() > MAX_SUBJECT_CHARS {
        return Err(MentorError::Validation(format!(
            "subject must be at most {MAX_SUBJECT_CHARS} characters"
        )));
    }
    Ok(())
}

/// Fails with `SlotConflict` when the draft overlaps a blocking booking.
///
/// Stores call this between reading the mentor's sessions and inserting the
/// draft, inside the same per-mentor critical section.
pub fn ensure_no_conflict(draft: &BookingDraft, existing: &[Booking]) -> MentorResult<()> {
    if slots::collides_with_any(draft.start_at, draft.end_at(), existing) {
        return Err(MentorError::SlotConflict);
    }
    Ok(())
}

/// Validates moving `booking` to `target` on behalf of `actor_id`.
///
/// Either participant may cancel anything not yet completed or cancelled.
/// Only the mentor records an outcome, only for a scheduled session, and
/// not before the session has started.
pub fn check_transition(
    booking: &Booking,
    actor_id: Uuid,
    target: BookingStatus,
    now: DateTime<Utc>,
) -> MentorResult<()> {
    match target {
        BookingStatus::Cancelled => {
            if !booking.involves(actor_id) {
                return Err(MentorError::Unauthorized(
                    "only the mentor or the student can cancel this session".to_string(),
                ));
            }
            if matches!(booking.status, BookingStatus::Completed | BookingStatus::Cancelled) {
                return Err(MentorError::AlreadyFinalized(booking.status.to_string()));
            }
        }
        BookingStatus::Completed | BookingStatus::NoShow => {
            if booking.mentor_id != actor_id {
                return Err(MentorError::Unauthorized(
                    "only the mentor can record a session outcome".to_string(),
                ));
            }
            if booking.status != BookingStatus::Scheduled {
                return Err(MentorError::AlreadyFinalized(booking.status.to_string()));
            }
            if now < booking.start_at {
                return Err(MentorError::Validation(
                    "an outcome cannot be recorded before the session starts".to_string(),
                ));
            }
        }
        BookingStatus::Scheduled => {
            return Err(MentorError::Validation(
                "a session cannot be moved back to scheduled".to_string(),
            ));
        }
    }
    Ok(())
}

/// Read access to a single session is limited to its participants.
pub fn ensure_participant(booking: &Booking, actor_id: Uuid) -> MentorResult<()> {
    if booking.involves(actor_id) {
        Ok(())
    } else {
        Err(MentorError::Unauthorized(
            "only the mentor or the student can view this session".to_string(),
        ))
    }
}
