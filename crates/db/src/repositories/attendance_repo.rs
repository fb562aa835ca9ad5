//! Repository for the `attendance_events` table.
//!
//! Events are append-only and deduplicated by calendar day via
//! `uq_attendance_events_user_day`. The only delete path is the history
//! reset at promotion.

use cadence_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use sqlx::PgExecutor;

use crate::models::attendance::MonthlyAttendance;

/// Provides access to a user's attendance history.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Append an attended mark for `marked_on`.
    ///
    /// Returns `false` when the day was already marked (the insert is a
    /// no-op); the caller still recomputes the percentage.
    pub async fn insert_day(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        marked_at: Timestamp,
        marked_on: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO attendance_events (user_id, marked_at, marked_on, attended) \
             VALUES ($1, $2, $3, TRUE) \
             ON CONFLICT ON CONSTRAINT uq_attendance_events_user_day DO NOTHING",
        )
        .bind(user_id)
        .bind(marked_at)
        .bind(marked_on)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count attended events for a user.
    pub async fn count_for_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM attendance_events WHERE user_id = $1 AND attended")
                .bind(user_id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// Discard a user's attendance history (promotion reset).
    pub async fn delete_for_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance_events WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Per-month attended-day counts for one calendar year.
    ///
    /// Months without events are absent from the result.
    pub async fn monthly_counts(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        year: i32,
    ) -> Result<Vec<MonthlyAttendance>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyAttendance>(
            "SELECT EXTRACT(MONTH FROM marked_on)::INT AS month, COUNT(*) AS attended_days \
             FROM attendance_events \
             WHERE user_id = $1 AND EXTRACT(YEAR FROM marked_on)::INT = $2 AND attended \
             GROUP BY month \
             ORDER BY month",
        )
        .bind(user_id)
        .bind(year)
        .fetch_all(executor)
        .await
    }
}
