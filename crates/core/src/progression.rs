//! Level-progression state machine.
//!
//! Transitions are evaluated once per attendance mark, after the percentage
//! has been recomputed. The machine is event-driven only: time passing by
//! itself never changes a user's level, so a user who stops answering on or
//! after their terminal day stays where they are.
//!
//! A user is promoted iff the mark lands on the terminal calendar day of the
//! active plan AND the cumulative percentage meets the plan threshold. There
//! is no failure transition for missing the threshold, and no state beyond
//! [`crate::levels::MAX_LEVEL`].

use crate::calendar::DayReference;
use crate::levels::MAX_LEVEL;
use crate::types::Timestamp;

/// Outcome of evaluating the state machine for one attendance mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionDecision {
    /// Advance to `to_level`; attendance history and percentage reset.
    Promote { to_level: i32 },
    /// No transition. The recomputed percentage is still persisted.
    Stay,
}

/// Whether `now` falls on the same calendar day as the plan's end.
///
/// Full-date comparison in the reference zone; the year is significant.
pub fn is_terminal_day(plan_ends_at: Timestamp, now: Timestamp, day_ref: DayReference) -> bool {
    day_ref.same_calendar_day(plan_ends_at, now)
}

/// Evaluate the promotion rule for one attendance mark.
pub fn evaluate(
    current_level: i32,
    percentage: f64,
    min_attendance_percentage: f64,
    plan_ends_at: Timestamp,
    now: Timestamp,
    day_ref: DayReference,
) -> PromotionDecision {
    if current_level >= MAX_LEVEL {
        // Top of the ladder: the machine simply stops advancing.
        return PromotionDecision::Stay;
    }
    if is_terminal_day(plan_ends_at, now, day_ref) && percentage >= min_attendance_percentage {
        PromotionDecision::Promote {
            to_level: current_level + 1,
        }
    } else {
        PromotionDecision::Stay
    }
}
