//! Handlers for attendance marking and the yearly summary.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use cadence_core::error::CoreError;
use cadence_db::models::question::SubmitAnswer;
use cadence_db::repositories::AttendanceRepo;

use crate::engine;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireLearner;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Mark attendance
// ---------------------------------------------------------------------------

/// PATCH /api/v1/users/attendance
///
/// Submit the answer to today's question and mark attendance. Runs the full
/// engine pipeline and returns the caller's updated progression state.
/// Learner-only: admins author questions but do not attend.
pub async fn mark_attendance(
    RequireLearner(learner): RequireLearner,
    State(state): State<AppState>,
    Json(input): Json<SubmitAnswer>,
) -> AppResult<impl IntoResponse> {
    let snapshot = engine::submit_daily_answer(
        &state.pool,
        state.clock.now(),
        state.day_ref,
        learner.user_id,
        &input,
    )
    .await?;

    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// Monthly summary
// ---------------------------------------------------------------------------

/// GET /api/v1/users/attendance/monthly/{year}
///
/// Per-month attended-day counts for the caller in one calendar year.
/// Covers only surviving events; history discarded at promotion is gone.
pub async fn monthly_attendance(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<impl IntoResponse> {
    if !(1970..=9999).contains(&year) {
        return Err(CoreError::Validation(format!("Invalid year {year}")).into());
    }

    let months = AttendanceRepo::monthly_counts(&state.pool, auth.user_id, year).await?;
    Ok(Json(DataResponse { data: months }))
}
