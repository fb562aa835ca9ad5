//! Level plan entity: the time window and threshold for one user's level.

use cadence_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `level_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LevelPlan {
    pub id: DbId,
    pub user_id: DbId,
    pub level: i32,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub min_attendance_percentage: f64,
    pub created_at: Timestamp,
}
