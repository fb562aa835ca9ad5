//! Question entity and DTOs for the daily-question registry.

use cadence_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub level: i32,
    pub title: String,
    pub body: String,
    pub created_by: DbId,
    /// Calendar date (reference zone) this question is "the" question for.
    pub question_day: NaiveDate,
    pub created_at: Timestamp,
}

/// DTO for creating today's question via `POST /api/v1/questions`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestion {
    pub level: i32,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "body must not be empty"))]
    pub body: String,
}

/// DTO for submitting an answer via `PATCH /api/v1/users/attendance`.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswer {
    pub question_id: DbId,
    pub answer: String,
}

/// A row from the `question_answers` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionAnswer {
    pub id: DbId,
    pub question_id: DbId,
    pub user_id: DbId,
    pub answer: String,
    pub answered_at: Timestamp,
}
