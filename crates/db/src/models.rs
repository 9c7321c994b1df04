use chrono::{DateTime, NaiveTime, Utc};
use eyre::{eyre, Report};
use mentorbook_core::models::{
    availability::AvailabilityWindow,
    booking::{Booking, BookingStatus},
    mentor::Mentor,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMentor {
    pub user_id: Uuid,
    pub display_name: String,
    pub specialties: Vec<String>,
    pub bio: Option<String>,
    pub total_sessions: i32,
    pub created_at: DateTime<Utc>,
}

impl From<DbMentor> for Mentor {
    fn from(row: DbMentor) -> Self {
        Mentor {
            id: row.user_id,
            display_name: row.display_name,
            specialties: row.specialties,
            bio: row.bio,
            total_sessions: row.total_sessions,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityWindow {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub position: i32,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
}

impl TryFrom<DbAvailabilityWindow> for AvailabilityWindow {
    type Error = Report;

    fn try_from(row: DbAvailabilityWindow) -> Result<Self, Self::Error> {
        let day_of_week = u8::try_from(row.day_of_week)
            .map_err(|_| eyre!("Invalid day_of_week {} on window {}", row.day_of_week, row.id))?;

        Ok(AvailabilityWindow {
            id: row.id,
            mentor_id: row.mentor_id,
            day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            is_active: row.is_active,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub subject: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbBooking> for Booking {
    type Error = Report;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<BookingStatus>()
            .map_err(|e| eyre!("Session {}: {}", row.id, e))?;

        Ok(Booking {
            id: row.id,
            mentor_id: row.mentor_id,
            student_id: row.student_id,
            start_at: row.start_at,
            duration_minutes: row.duration_minutes,
            subject: row.subject,
            description: row.description,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
