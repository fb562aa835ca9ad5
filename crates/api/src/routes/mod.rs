pub mod health;
pub mod questions;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /questions                           list (admin), create (admin)
/// /questions/daily/{level}             resolve today's question
///
/// /users                               bootstrap user + plans (admin)
/// /users/attendance                    submit answer / mark attendance (PATCH)
/// /users/attendance/monthly/{year}     monthly attended-day counts
/// /users/me/progression                caller's progression state
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/questions", questions::router())
        .nest("/users", users::router())
}
