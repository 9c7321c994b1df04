use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A free, bookable candidate appointment. Computed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
}

impl Slot {
    pub fn end_at(&self) -> DateTime<Utc> {
        self.start_at + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Presentation form with the calendar fields rendered in `tz`.
    pub fn to_response<Tz: TimeZone>(&self, tz: &Tz) -> SlotResponse
    where
        Tz::Offset: std::fmt::Display,
    {
        let local = self.start_at.with_timezone(tz);
        SlotResponse {
            start_at: self.start_at,
            duration_minutes: self.duration_minutes,
            date: local.format("%Y-%m-%d").to_string(),
            time: local.format("%H:%M").to_string(),
            day_name: DAY_NAMES[local.weekday().num_days_from_monday() as usize].to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotResponse {
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub date: String,
    pub time: String,
    pub day_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub slots: Vec<SlotResponse>,
    pub total: usize,
}
