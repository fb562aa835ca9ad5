//! Attendance event entity and read models.

use cadence_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `attendance_events` table. Immutable once appended.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceEvent {
    pub id: DbId,
    pub user_id: DbId,
    pub marked_at: Timestamp,
    /// Calendar date (reference zone) the mark counts for.
    pub marked_on: NaiveDate,
    pub attended: bool,
}

/// One month's attended-day count, for the yearly summary endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthlyAttendance {
    /// 1-based month number.
    pub month: i32,
    pub attended_days: i64,
}
