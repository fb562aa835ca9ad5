//! Handlers for the `/questions` resource: the daily-question registry.
//!
//! Question authoring and listing are admin-only; resolving today's
//! question is open to any authenticated caller.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cadence_core::error::CoreError;
use cadence_core::levels;
use cadence_db::models::question::CreateQuestion;
use cadence_db::repositories::QuestionRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/v1/questions
///
/// Create today's question for a level (admin only). Returns 201 with the
/// question, or 409 `ALREADY_EXISTS` if this level already has a question
/// whose `created_at` falls inside today's window.
pub async fn create_question(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateQuestion>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    levels::validate_level(input.level)?;

    let now = state.clock.now();
    let window = state.day_ref.day_bounds(now);

    // Friendly pre-check; uq_questions_level_day is the real guarantee and
    // the error classifier maps its violation to the same rejection.
    if let Some(existing) = QuestionRepo::find_daily(&state.pool, input.level, window).await? {
        return Err(CoreError::AlreadyExists {
            entity: "Question",
            detail: format!(
                "level {} already has question {} for {}",
                input.level, existing.id, existing.question_day
            ),
        }
        .into());
    }

    let question = QuestionRepo::create_daily(
        &state.pool,
        input.level,
        &input.title,
        &input.body,
        admin.user_id,
        state.day_ref.local_date(now),
        now,
    )
    .await?;

    tracing::info!(
        question_id = question.id,
        level = question.level,
        created_by = admin.user_id,
        "Daily question created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

// ---------------------------------------------------------------------------
// Resolve today's question
// ---------------------------------------------------------------------------

/// GET /api/v1/questions/daily/{level}
///
/// Resolve today's question for a level. 404 when no question was created
/// today for that level.
pub async fn get_daily_question(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(level): Path<i32>,
) -> AppResult<impl IntoResponse> {
    levels::validate_level(level)?;

    let window = state.day_ref.day_bounds(state.clock.now());
    let question = QuestionRepo::find_daily(&state.pool, level, window)
        .await?
        .ok_or(CoreError::NoDailyQuestion { level })?;

    Ok(Json(DataResponse { data: question }))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/v1/questions
///
/// List all questions, newest first (admin only).
pub async fn list_questions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let questions = QuestionRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: questions }))
}
