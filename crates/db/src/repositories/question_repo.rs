//! Repository for the `questions` table (the daily-question registry).
//!
//! The `uq_questions_level_day` constraint is the authoritative "one
//! question per level per calendar day" invariant; the handler pre-check via
//! [`QuestionRepo::find_daily`] only exists to return a friendly error
//! before the insert races.

use cadence_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use sqlx::PgExecutor;

use crate::models::question::Question;

/// Column list for `questions` queries.
const COLUMNS: &str = "id, level, title, body, created_by, question_day, created_at";

/// Provides access to daily questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert the question for `question_day` at `level`.
    ///
    /// A duplicate day surfaces as a unique-constraint violation on
    /// `uq_questions_level_day`.
    pub async fn create_daily(
        executor: impl PgExecutor<'_>,
        level: i32,
        title: &str,
        body: &str,
        created_by: DbId,
        question_day: NaiveDate,
        created_at: Timestamp,
    ) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (level, title, body, created_by, question_day, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(level)
            .bind(title)
            .bind(body)
            .bind(created_by)
            .bind(question_day)
            .bind(created_at)
            .fetch_one(executor)
            .await
    }

    /// Find the question for `level` whose `created_at` lies in the
    /// half-open window `[start, end)`.
    pub async fn find_daily(
        executor: impl PgExecutor<'_>,
        level: i32,
        window: (Timestamp, Timestamp),
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions \
             WHERE level = $1 AND created_at >= $2 AND created_at < $3"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(level)
            .bind(window.0)
            .bind(window.1)
            .fetch_optional(executor)
            .await
    }

    /// Find a question by its id.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all questions, newest first (admin view).
    pub async fn list_all(executor: impl PgExecutor<'_>) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions ORDER BY created_at DESC");
        sqlx::query_as::<_, Question>(&query).fetch_all(executor).await
    }
}
