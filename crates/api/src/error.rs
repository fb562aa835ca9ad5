use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cadence_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cadence_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The caller's identity could not be established.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller's role does not permit this operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::NoDailyQuestion { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::AlreadyExists { .. } => {
                    (StatusCode::CONFLICT, "ALREADY_EXISTS", core.to_string())
                }
                CoreError::LevelMismatch { .. } => {
                    (StatusCode::BAD_REQUEST, "LEVEL_MISMATCH", core.to_string())
                }
                CoreError::AlreadyAnswered { .. } => {
                    (StatusCode::CONFLICT, "ALREADY_ANSWERED", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// Unique-constraint violations are mapped by constraint name so races that
/// slip past the handlers' pre-checks still surface as the documented
/// domain rejection rather than a 500:
/// - `uq_questions_level_day` -> 409 `ALREADY_EXISTS`
/// - `uq_question_answers_question_user` -> 409 `ALREADY_ANSWERED`
/// - any other `uq_` constraint -> 409 `CONFLICT`
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                match constraint {
                    "uq_questions_level_day" => {
                        return (
                            StatusCode::CONFLICT,
                            "ALREADY_EXISTS",
                            "A question already exists for this level today".to_string(),
                        );
                    }
                    "uq_question_answers_question_user" => {
                        return (
                            StatusCode::CONFLICT,
                            "ALREADY_ANSWERED",
                            "This question was already answered by the user".to_string(),
                        );
                    }
                    other if other.starts_with("uq_") => {
                        return (
                            StatusCode::CONFLICT,
                            "CONFLICT",
                            format!("Duplicate value violates unique constraint: {other}"),
                        );
                    }
                    _ => {}
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
