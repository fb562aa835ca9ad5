use crate::types::DbId;

/// Domain error taxonomy for the progression engine.
///
/// Every rejected path produces one of these; nothing is swallowed or
/// retried inside the engine. `Conflict` is the only variant a caller may
/// reasonably retry (a lost optimistic-concurrency race); everything else
/// is a terminal, user-facing rejection.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("No daily question for level {level} today")]
    NoDailyQuestion { level: i32 },

    #[error("{entity} already exists: {detail}")]
    AlreadyExists {
        entity: &'static str,
        detail: String,
    },

    #[error("Question is for level {question_level} but user is at level {user_level}")]
    LevelMismatch {
        question_level: i32,
        user_level: i32,
    },

    #[error("Question {question_id} was already answered by user {user_id}")]
    AlreadyAnswered { question_id: DbId, user_id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
