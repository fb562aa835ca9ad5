//! The submit-answer pipeline.
//!
//! One inbound submission flows through: resolve today's question for the
//! caller's level -> record the answer in the ledger -> append an attendance
//! event -> recompute the cumulative percentage -> evaluate the promotion
//! rule -> persist the progression fields. The write half runs in a single
//! transaction guarded by the user row's `lock_version`, so a concurrent
//! submission either serializes cleanly or loses the race and rolls back
//! everything, including its answer row.

use cadence_core::calendar::{days_elapsed, DayReference};
use cadence_core::error::CoreError;
use cadence_core::progression::{evaluate, PromotionDecision};
use cadence_core::types::{DbId, Timestamp};
use cadence_core::{answer, attendance};
use cadence_db::models::question::SubmitAnswer;
use cadence_db::repositories::{AnswerRepo, AttendanceRepo, LevelPlanRepo, QuestionRepo, UserRepo};
use cadence_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// The caller-visible progression state after one submission.
#[derive(Debug, Serialize)]
pub struct ProgressionSnapshot {
    pub user_id: DbId,
    pub current_level: i32,
    pub attendance_percentage: f64,
    pub attended_days: i64,
    pub promoted: bool,
}

/// Run the full submission pipeline for one user and one question.
///
/// Failure taxonomy, in check order: `NotFound` (user, question, or no
/// daily question), `LevelMismatch` (wins over answer-content problems),
/// `Validation` (empty answer, stale question), `AlreadyAnswered`,
/// `Conflict` (lost optimistic race; the one retryable kind).
pub async fn submit_daily_answer(
    pool: &DbPool,
    now: Timestamp,
    day_ref: DayReference,
    user_id: DbId,
    input: &SubmitAnswer,
) -> AppResult<ProgressionSnapshot> {
    let user = UserRepo::find_by_id(pool, user_id, false)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;

    let question = QuestionRepo::find_by_id(pool, input.question_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Question",
            id: input.question_id,
        })?;

    // Level and answer-content checks; the level check runs first.
    answer::validate_submission(question.level, user.current_level, &input.answer)?;

    // The submitted question must be today's question for the caller's level.
    let window = day_ref.day_bounds(now);
    let daily = QuestionRepo::find_daily(pool, user.current_level, window)
        .await?
        .ok_or(CoreError::NoDailyQuestion {
            level: user.current_level,
        })?;
    if daily.id != question.id {
        return Err(CoreError::Validation(format!(
            "Question {} is not today's question for level {}",
            question.id, user.current_level
        ))
        .into());
    }

    // Friendly pre-check; the unique constraint catches the race.
    if AnswerRepo::exists(pool, question.id, user.id).await? {
        return Err(CoreError::AlreadyAnswered {
            question_id: question.id,
            user_id: user.id,
        }
        .into());
    }

    let mut tx = pool.begin().await.map_err(AppError::Database)?;

    AnswerRepo::insert(&mut *tx, question.id, user.id, input.answer.trim(), now).await?;

    // Day-deduplicated: a second mark on the same calendar day (e.g. after a
    // same-day promotion) does not add a row but still recomputes.
    let newly_marked =
        AttendanceRepo::insert_day(&mut *tx, user.id, now, day_ref.local_date(now)).await?;

    let attended_days = AttendanceRepo::count_for_user(&mut *tx, user.id).await?;

    let plan = LevelPlanRepo::find_for_user_level(&mut *tx, user.id, user.current_level)
        .await?
        .ok_or_else(|| {
            CoreError::Internal(format!(
                "User {} has no level plan for level {}",
                user.id, user.current_level
            ))
        })?;

    let percentage =
        attendance::attendance_percentage(attended_days, days_elapsed(plan.starts_at, now));

    let decision = evaluate(
        user.current_level,
        percentage,
        plan.min_attendance_percentage,
        plan.ends_at,
        now,
        day_ref,
    );

    let snapshot = match decision {
        PromotionDecision::Promote { to_level } => {
            // History is discarded at promotion, not archived.
            AttendanceRepo::delete_for_user(&mut *tx, user.id).await?;
            let applied =
                UserRepo::apply_progression(&mut *tx, user.id, user.lock_version, to_level, 0.0)
                    .await?;
            if !applied {
                return Err(lost_race(user.id));
            }
            ProgressionSnapshot {
                user_id: user.id,
                current_level: to_level,
                attendance_percentage: 0.0,
                attended_days: 0,
                promoted: true,
            }
        }
        PromotionDecision::Stay => {
            let applied = UserRepo::apply_progression(
                &mut *tx,
                user.id,
                user.lock_version,
                user.current_level,
                percentage,
            )
            .await?;
            if !applied {
                return Err(lost_race(user.id));
            }
            ProgressionSnapshot {
                user_id: user.id,
                current_level: user.current_level,
                attendance_percentage: percentage,
                attended_days,
                promoted: false,
            }
        }
    };

    tx.commit().await.map_err(AppError::Database)?;

    tracing::info!(
        user_id = user.id,
        question_id = question.id,
        level = snapshot.current_level,
        percentage = snapshot.attendance_percentage,
        newly_marked,
        promoted = snapshot.promoted,
        "Attendance marked",
    );

    Ok(snapshot)
}

/// The transaction is dropped (rolled back) by the caller returning this.
fn lost_race(user_id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Progression state for user {user_id} was modified concurrently; retry the request"
    )))
}
