use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{MentorError, MentorResult};

/// A recurring weekly interval during which a mentor accepts bookings.
///
/// `day_of_week` counts from Monday (0) to Sunday (6). Times are naive and
/// interpreted in the platform's operating timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub day_of_week: u8,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_active: bool,
}

impl AvailabilityWindow {
    pub fn weekday(&self) -> Option<Weekday> {
        weekday_from_index(self.day_of_week)
    }
}

/// One window in a full-replace availability update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindowRequest {
    pub day_of_week: u8,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl AvailabilityWindowRequest {
    pub fn new(day_of_week: u8, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            day_of_week,
            start_time,
            end_time,
            is_active: true,
        }
    }

    pub fn validate(&self) -> MentorResult<()> {
        if weekday_from_index(self.day_of_week).is_none() {
            return Err(MentorError::Validation(format!(
                "day_of_week must be between 0 (Monday) and 6 (Sunday), got {}",
                self.day_of_week
            )));
        }
        if self.start_time >= self.end_time {
            return Err(MentorError::Validation(format!(
                "window start {} must be before end {}",
                self.start_time.format("%H:%M"),
                self.end_time.format("%H:%M")
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceAvailabilityRequest {
    #[serde(default)]
    pub availabilities: Vec<AvailabilityWindowRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityWindowsResponse {
    pub availabilities: Vec<AvailabilityWindow>,
}

/// The schedule applied to mentors that never configured availability:
/// weekday mornings 09:00-12:00 and afternoons 14:00-18:00.
pub fn default_weekly_schedule() -> Vec<AvailabilityWindowRequest> {
    let morning = (hm(9, 0), hm(12, 0));
    let afternoon = (hm(14, 0), hm(18, 0));

    (0..5u8)
        .flat_map(|day| {
            [morning, afternoon]
                .into_iter()
                .map(move |(start, end)| AvailabilityWindowRequest::new(day, start, end))
        })
        .collect()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

pub fn weekday_from_index(day_of_week: u8) -> Option<Weekday> {
    match day_of_week {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Serde adapter for `"HH:MM"` time-of-day strings. Seconds are accepted on
/// input and dropped on output.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|e| D::Error::custom(format!("invalid time '{raw}': {e}")))
    }
}
