//! Level range constants and the default per-level plan configuration.
//!
//! Each user gets one plan per level at account creation; plans are
//! read-only afterwards.

use crate::error::CoreError;

/// Lowest level a user can be at. Users start here.
pub const MIN_LEVEL: i32 = 1;

/// Highest configured level. A user at this level is never promoted further;
/// there is no separate "completed" state.
pub const MAX_LEVEL: i32 = 3;

/// Default plan parameters for one level.
#[derive(Debug, Clone, Copy)]
pub struct LevelPlanDefaults {
    pub level: i32,
    /// Days from enrollment to this level's terminal day. Windows are
    /// consecutive: a level's window starts at the previous level's end, so
    /// the attendance denominator never outgrows the days the level itself
    /// covers.
    pub ends_after_days: i64,
    pub min_attendance_percentage: f64,
}

/// Seed configuration: level 1 ends 3 weeks after enrollment at 80%, level
/// 2 at 7 weeks / 70%, level 3 at 10 weeks / 70%.
pub const LEVEL_PLAN_DEFAULTS: &[LevelPlanDefaults] = &[
    LevelPlanDefaults {
        level: 1,
        ends_after_days: 21,
        min_attendance_percentage: 80.0,
    },
    LevelPlanDefaults {
        level: 2,
        ends_after_days: 49,
        min_attendance_percentage: 70.0,
    },
    LevelPlanDefaults {
        level: 3,
        ends_after_days: 70,
        min_attendance_percentage: 70.0,
    },
];

/// Validate that a level is within the configured range.
pub fn validate_level(level: i32) -> Result<(), CoreError> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid level {level}. Must be between {MIN_LEVEL} and {MAX_LEVEL}"
        )))
    }
}
