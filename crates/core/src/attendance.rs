//! Attendance percentage math.
//!
//! The percentage is cumulative: the attended-day count only resets at a
//! promotion, and the denominator is the number of elapsed days since the
//! active level plan started (ceiling division, never zero).

/// `(attended_count / days_elapsed) * 100`.
///
/// A `days_elapsed` below 1 is treated as 1.
pub fn attendance_percentage(attended_count: i64, days_elapsed: i64) -> f64 {
    (attended_count as f64 / days_elapsed.max(1) as f64) * 100.0
}
