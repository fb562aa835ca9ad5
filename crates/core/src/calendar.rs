//! Calendar-day arithmetic in a single fixed reference time zone.
//!
//! "Calendar day" everywhere in the engine means the local date under a
//! configurable fixed UTC offset, never the server's local zone. Two
//! instants belong to the same day iff they map to the same local date.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Seconds in a calendar day; used for elapsed-day ceiling division.
const DAY_SECS: i64 = 86_400;

/// The reference time zone all day boundaries are computed in.
#[derive(Debug, Clone, Copy)]
pub struct DayReference {
    offset: FixedOffset,
}

impl DayReference {
    /// UTC reference zone (the default).
    pub fn utc() -> Self {
        Self {
            offset: FixedOffset::east_opt(0).expect("zero offset is always valid"),
        }
    }

    /// Build a reference zone from an east-of-UTC offset in minutes.
    ///
    /// Rejects offsets at or beyond a full day (chrono's own limit).
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, CoreError> {
        let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
            CoreError::Validation(format!("Invalid day offset: {minutes} minutes"))
        })?;
        Ok(Self { offset })
    }

    /// The local calendar date `at` falls on in the reference zone.
    pub fn local_date(&self, at: Timestamp) -> NaiveDate {
        (at + Duration::seconds(i64::from(self.offset.local_minus_utc()))).date_naive()
    }

    /// Half-open UTC bounds `[start, end)` of the calendar day containing `at`.
    pub fn day_bounds(&self, at: Timestamp) -> (Timestamp, Timestamp) {
        let offset_secs = i64::from(self.offset.local_minus_utc());
        let local_midnight = self.local_date(at).and_time(NaiveTime::MIN);
        let start = DateTime::<Utc>::from_naive_utc_and_offset(local_midnight, Utc)
            - Duration::seconds(offset_secs);
        (start, start + Duration::days(1))
    }

    /// Whether two instants fall on the same calendar day.
    ///
    /// Compares full local dates; month, day and year must all match.
    pub fn same_calendar_day(&self, a: Timestamp, b: Timestamp) -> bool {
        self.local_date(a) == self.local_date(b)
    }
}

/// Number of elapsed days between a window start and now.
///
/// `ceil(|now - start| / 1 day)`, floored at 1 so attendance percentages
/// never divide by zero on the start day itself.
pub fn days_elapsed(start: Timestamp, now: Timestamp) -> i64 {
    let secs = (now - start).num_seconds().abs();
    let days = (secs + DAY_SECS - 1) / DAY_SECS;
    days.max(1)
}
