//! Notifications produced by booking state changes.
//!
//! The core only builds them; delivery belongs to whatever implements
//! [`NotificationSink`](crate::ports::NotificationSink).

use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::booking::Booking;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SessionBooking,
    SessionConfirmation,
    SessionCancelled,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::SessionBooking => "session_booking",
            NotificationKind::SessionConfirmation => "session_confirmation",
            NotificationKind::SessionCancelled => "session_cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub related_id: Uuid,
}

fn when<Tz: TimeZone>(booking: &Booking, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    booking
        .start_at
        .with_timezone(tz)
        .format("%d/%m/%Y at %H:%M")
        .to_string()
}

/// One notice for the mentor and one confirmation for the student.
pub fn booking_accepted<Tz: TimeZone>(booking: &Booking, tz: &Tz) -> [Notification; 2]
where
    Tz::Offset: std::fmt::Display,
{
    let when = when(booking, tz);
    [
        Notification {
            recipient_id: booking.mentor_id,
            kind: NotificationKind::SessionBooking,
            title: "New session booking".to_string(),
            message: format!(
                "A student booked a {}-minute session with you on {when}: {}",
                booking.duration_minutes, booking.subject
            ),
            related_id: booking.id,
        },
        Notification {
            recipient_id: booking.student_id,
            kind: NotificationKind::SessionConfirmation,
            title: "Session confirmed".to_string(),
            message: format!("Your session on {when} is confirmed: {}", booking.subject),
            related_id: booking.id,
        },
    ]
}

/// Tells the participant who did not cancel.
pub fn booking_cancelled<Tz: TimeZone>(booking: &Booking, cancelled_by: Uuid, tz: &Tz) -> Notification
where
    Tz::Offset: std::fmt::Display,
{
    let who = if cancelled_by == booking.mentor_id {
        "Your mentor"
    } else {
        "Your student"
    };
    Notification {
        recipient_id: booking.counterpart_of(cancelled_by),
        kind: NotificationKind::SessionCancelled,
        title: "Session cancelled".to_string(),
        message: format!("{who} cancelled the session on {}", when(booking, tz)),
        related_id: booking.id,
    }
}
