use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Scheduled => "scheduled",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::NoShow => "no_show",
        }
    }

    /// Whether a booking in this status occupies the mentor's time.
    pub fn blocks_availability(&self) -> bool {
        matches!(self, BookingStatus::Scheduled | BookingStatus::Completed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(BookingStatus::Scheduled),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "no_show" => Ok(BookingStatus::NoShow),
            other => Err(format!("unknown booking status '{other}'")),
        }
    }
}

/// A committed session between a mentor and a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub subject: String,
    pub description: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn end_at(&self) -> DateTime<Utc> {
        self.start_at + Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn blocks_availability(&self) -> bool {
        self.status.blocks_availability()
    }

    pub fn involves(&self, user_id: Uuid) -> bool {
        self.mentor_id == user_id || self.student_id == user_id
    }

    /// The participant on the other side of `actor_id`.
    pub fn counterpart_of(&self, actor_id: Uuid) -> Uuid {
        if actor_id == self.student_id {
            self.mentor_id
        } else {
            self.student_id
        }
    }
}

/// A validated booking request, ready for the store to check and insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub subject: String,
    pub description: Option<String>,
}

impl BookingDraft {
    pub fn end_at(&self) -> DateTime<Utc> {
        self.start_at + Duration::minutes(i64::from(self.duration_minutes))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSessionRequest {
    pub start_at: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub subject: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOutcomeRequest {
    pub status: BookingStatus,
}

/// Which side of the booking the caller is listing sessions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionRole {
    #[default]
    Student,
    Mentor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFilter {
    pub user_id: Uuid,
    pub role: SessionRole,
    pub status: Option<BookingStatus>,
}

impl SessionFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        let party = match self.role {
            SessionRole::Student => booking.student_id,
            SessionRole::Mentor => booking.mentor_id,
        };
        party == self.user_id && self.status.is_none_or(|status| status == booking.status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: Booking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<Booking>,
}
