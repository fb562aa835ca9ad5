//! Handlers for user bootstrap and progression reads.
//!
//! Signup, login and profile editing live in the out-of-scope identity
//! service; this surface only creates the rows the engine needs (user +
//! default level plans) and exposes the progression state.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cadence_core::error::CoreError;
use cadence_db::models::level_plan::LevelPlan;
use cadence_db::models::user::{CreateUser, User};
use cadence_db::repositories::{AttendanceRepo, LevelPlanRepo, UserRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Progression read model for `GET /api/v1/users/me/progression`.
#[derive(Debug, Serialize)]
pub struct ProgressionView {
    pub user: User,
    /// The active plan for the user's current level.
    pub plan: LevelPlan,
    pub attended_days: i64,
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Create a user plus the default level plans (admin only). Level 1's
/// window starts at the moment of creation; each later window starts where
/// the previous one ends.
pub async fn create_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let now = state.clock.now();
    let mut tx = state.pool.begin().await.map_err(AppError::Database)?;

    let user = UserRepo::create(&mut *tx, &input).await?;
    LevelPlanRepo::create_defaults(&mut *tx, user.id, now).await?;

    tx.commit().await.map_err(AppError::Database)?;

    tracing::info!(user_id = user.id, email = %user.email, "User bootstrapped");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

// ---------------------------------------------------------------------------
// Progression read
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me/progression
///
/// The caller's current level, percentage, attendance count and active plan.
pub async fn get_my_progression(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id, false)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;

    let plan = LevelPlanRepo::find_for_user_level(&state.pool, user.id, user.current_level)
        .await?
        .ok_or_else(|| {
            CoreError::Internal(format!(
                "User {} has no level plan for level {}",
                user.id, user.current_level
            ))
        })?;

    let attended_days = AttendanceRepo::count_for_user(&state.pool, user.id).await?;

    Ok(Json(DataResponse {
        data: ProgressionView {
            user,
            plan,
            attended_days,
        },
    }))
}
