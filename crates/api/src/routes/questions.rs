//! Route definitions for the `/questions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::questions;
use crate::state::AppState;

/// Routes mounted at `/questions`.
///
/// ```text
/// GET    /                 -> list_questions (admin)
/// POST   /                 -> create_question (admin)
/// GET    /daily/{level}    -> get_daily_question
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/daily/{level}", get(questions::get_daily_question))
}
