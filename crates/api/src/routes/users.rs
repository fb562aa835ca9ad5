//! Route definitions for the `/users` resource (progression surface only).

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{attendance, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                           -> create_user (admin)
/// PATCH  /attendance                 -> mark_attendance (learner)
/// GET    /attendance/monthly/{year}  -> monthly_attendance
/// GET    /me/progression             -> get_my_progression
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create_user))
        .route("/attendance", patch(attendance::mark_attendance))
        .route(
            "/attendance/monthly/{year}",
            get(attendance::monthly_attendance),
        )
        .route("/me/progression", get(users::get_my_progression))
}
