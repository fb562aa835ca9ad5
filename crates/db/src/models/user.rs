//! User entity and DTOs. Only progression-relevant fields live here; the
//! identity service owns credentials and profile extras.

use cadence_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub current_level: i32,
    pub attendance_percentage: f64,
    pub blocked: bool,
    /// Bumped on every progression write; stale writers lose.
    #[serde(skip)]
    pub lock_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for bootstrapping a user via `POST /api/v1/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// Defaults to `user` when omitted.
    pub role: Option<String>,
}
