//! Repository for the `question_answers` ledger.
//!
//! At-most-one answer per `(question, user)` is enforced by
//! `uq_question_answers_question_user`; the insert is the serialization
//! point for concurrent submissions from the same user.

use cadence_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::question::QuestionAnswer;

/// Column list for `question_answers` queries.
const COLUMNS: &str = "id, question_id, user_id, answer, answered_at";

/// Provides access to the answer ledger.
pub struct AnswerRepo;

impl AnswerRepo {
    /// Append an answer record. Duplicates surface as a unique-constraint
    /// violation, never as a second row.
    pub async fn insert(
        executor: impl PgExecutor<'_>,
        question_id: DbId,
        user_id: DbId,
        answer: &str,
        answered_at: Timestamp,
    ) -> Result<QuestionAnswer, sqlx::Error> {
        let query = format!(
            "INSERT INTO question_answers (question_id, user_id, answer, answered_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuestionAnswer>(&query)
            .bind(question_id)
            .bind(user_id)
            .bind(answer)
            .bind(answered_at)
            .fetch_one(executor)
            .await
    }

    /// Whether `user_id` has already answered `question_id`.
    pub async fn exists(
        executor: impl PgExecutor<'_>,
        question_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM question_answers WHERE question_id = $1 AND user_id = $2)",
        )
        .bind(question_id)
        .bind(user_id)
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }
}
