//! Slot enumeration over recurring weekly availability.
//!
//! Everything here is pure: callers load a mentor's windows and bookings,
//! pick the evaluation instant and the platform timezone, and get back the
//! free slots. Intervals are half-open, so a booking ending at 10:00 never
//! blocks a slot starting at 10:00.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, TimeZone, Utc};

use crate::{
    errors::{MentorError, MentorResult},
    models::{availability::AvailabilityWindow, booking::Booking, slot::Slot},
};

pub const DEFAULT_HORIZON_DAYS: u32 = 7;
pub const DEFAULT_GRANULARITY_MINUTES: i32 = 30;
pub const DEFAULT_SESSION_MINUTES: i32 = 60;

/// Parameters of a slot enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotQuery {
    pub horizon_days: u32,
    pub granularity_minutes: i32,
    pub session_duration_minutes: i32,
}

impl Default for SlotQuery {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            session_duration_minutes: DEFAULT_SESSION_MINUTES,
        }
    }
}

impl SlotQuery {
    pub fn validate(&self, max_horizon_days: u32) -> MentorResult<()> {
        if self.session_duration_minutes <= 0 {
            return Err(MentorError::InvalidDuration);
        }
        if self.horizon_days < 1 || self.horizon_days > max_horizon_days {
            return Err(MentorError::Validation(format!(
                "horizon must be between 1 and {max_horizon_days} days, got {}",
                self.horizon_days
            )));
        }
        if self.granularity_minutes <= 0 {
            return Err(MentorError::Validation(
                "slot granularity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Instants outside which no booking can affect this enumeration.
    pub fn booking_bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        // One extra day absorbs the offset between UTC and the platform zone.
        (now, now + Duration::days(i64::from(self.horizon_days) + 1))
    }
}

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` share an instant.
pub fn overlaps<T: PartialOrd>(s1: T, e1: T, s2: T, e2: T) -> bool {
    s1 < e2 && s2 < e1
}

/// Whether `[start, end)` collides with any booking that holds the mentor's time.
pub fn collides_with_any(start: DateTime<Utc>, end: DateTime<Utc>, bookings: &[Booking]) -> bool {
    bookings
        .iter()
        .filter(|booking| booking.blocks_availability())
        .any(|booking| overlaps(start, end, booking.start_at, booking.end_at()))
}

/// Lists the free slots of one mentor over `query.horizon_days` calendar days
/// starting at `now`'s date in `tz`.
///
/// Candidates walk each active window in `granularity_minutes` steps and must
/// fit entirely inside it. A candidate is dropped unless it starts strictly
/// after `now` and misses every scheduled or completed booking. The result is
/// sorted by start; equal starts keep window declaration order.
pub fn list_available_slots<Tz: TimeZone>(
    windows: &[AvailabilityWindow],
    bookings: &[Booking],
    query: &SlotQuery,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<Slot> {
    if query.session_duration_minutes <= 0 || query.granularity_minutes <= 0 {
        return Vec::new();
    }

    let duration = Duration::minutes(i64::from(query.session_duration_minutes));
    let step = Duration::minutes(i64::from(query.granularity_minutes));
    let today = now.with_timezone(tz).date_naive();

    let mut slots = Vec::new();
    for offset in 0..query.horizon_days {
        let date = today + Duration::days(i64::from(offset));
        let day_of_week = date.weekday().num_days_from_monday();

        let day_windows = windows
            .iter()
            .filter(|w| w.is_active && u32::from(w.day_of_week) == day_of_week);

        for window in day_windows {
            let window_end = date.and_time(window.end_time);
            let mut cursor = date.and_time(window.start_time);

            while cursor + duration <= window_end {
                if let Some(start_at) = local_to_utc(tz, cursor) {
                    let end_at = start_at + duration;
                    if start_at > now && !collides_with_any(start_at, end_at, bookings) {
                        slots.push(Slot {
                            start_at,
                            duration_minutes: query.session_duration_minutes,
                        });
                    }
                }
                cursor += step;
            }
        }
    }

    // Stable, so ties stay in window declaration order.
    slots.sort_by_key(|slot| slot.start_at);
    slots
}

/// Resolves a platform-local wall time. Times skipped by a DST transition
/// yield `None`; repeated ones resolve to the earlier instant.
pub fn local_to_utc<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
