//! Repository for the `users` table.
//!
//! Progression writes go through [`UserRepo::apply_progression`], which is
//! guarded by `lock_version` so concurrent read-modify-write cycles for the
//! same user serialize instead of clobbering each other.

use cadence_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "\
    id, name, email, role, current_level, attendance_percentage, \
    blocked, lock_version, created_at, updated_at";

/// Provides access to user rows and their progression fields.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user at level 1 with zero attendance.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, role) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.role.as_deref().unwrap_or(cadence_core::roles::ROLE_USER))
            .fetch_one(executor)
            .await
    }

    /// Find a user by id.
    ///
    /// Blocked users are invisible unless `include_blocked` is set; callers
    /// opt in explicitly rather than flipping hidden query state.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
        include_blocked: bool,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND ($2 OR NOT blocked)");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(include_blocked)
            .fetch_optional(executor)
            .await
    }

    /// Persist recomputed progression fields under the optimistic lock.
    ///
    /// Returns `false` when `expected_version` no longer matches, i.e. a
    /// concurrent writer got there first and this cycle must be retried by
    /// the caller.
    pub async fn apply_progression(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        expected_version: i64,
        current_level: i32,
        attendance_percentage: f64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users \
             SET current_level = $3, attendance_percentage = $4, \
                 lock_version = lock_version + 1, updated_at = NOW() \
             WHERE id = $1 AND lock_version = $2",
        )
        .bind(user_id)
        .bind(expected_version)
        .bind(current_level)
        .bind(attendance_percentage)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
