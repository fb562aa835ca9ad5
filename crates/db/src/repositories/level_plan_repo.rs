//! Repository for the `level_plans` table.

use cadence_core::levels::LEVEL_PLAN_DEFAULTS;
use cadence_core::types::{DbId, Timestamp};
use chrono::Duration;
use sqlx::PgExecutor;

use crate::models::level_plan::LevelPlan;

/// Column list for `level_plans` queries.
const COLUMNS: &str =
    "id, user_id, level, starts_at, ends_at, min_attendance_percentage, created_at";

/// Provides access to per-user level plans.
pub struct LevelPlanRepo;

impl LevelPlanRepo {
    /// Create the default plan set for a new user enrolled at `enrolled_at`.
    ///
    /// Windows are consecutive: level 1 starts at enrollment, and every
    /// later level starts where the previous one ends. End times are the
    /// configured offsets from enrollment. Runs several inserts, so it
    /// takes a connection rather than a pool; call it inside the bootstrap
    /// transaction.
    pub async fn create_defaults(
        conn: &mut sqlx::PgConnection,
        user_id: DbId,
        enrolled_at: Timestamp,
    ) -> Result<Vec<LevelPlan>, sqlx::Error> {
        let query = format!(
            "INSERT INTO level_plans \
                 (user_id, level, starts_at, ends_at, min_attendance_percentage) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );

        let mut plans = Vec::with_capacity(LEVEL_PLAN_DEFAULTS.len());
        let mut window_start = enrolled_at;
        for defaults in LEVEL_PLAN_DEFAULTS {
            let window_end = enrolled_at + Duration::days(defaults.ends_after_days);
            let plan = sqlx::query_as::<_, LevelPlan>(&query)
                .bind(user_id)
                .bind(defaults.level)
                .bind(window_start)
                .bind(window_end)
                .bind(defaults.min_attendance_percentage)
                .fetch_one(&mut *conn)
                .await?;
            window_start = window_end;
            plans.push(plan);
        }
        Ok(plans)
    }

    /// Find the plan for one of a user's levels.
    pub async fn find_for_user_level(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        level: i32,
    ) -> Result<Option<LevelPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM level_plans WHERE user_id = $1 AND level = $2");
        sqlx::query_as::<_, LevelPlan>(&query)
            .bind(user_id)
            .bind(level)
            .fetch_optional(executor)
            .await
    }
}
