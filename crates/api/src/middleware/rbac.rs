//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the requirement. Role gating happens here, before the engine is
//! invoked; the engine itself never inspects roles.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cadence_core::roles::{ROLE_ADMIN, ROLE_USER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Forbidden("Admin role required".into()));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires the `user` (learner) role. Rejects with 403 Forbidden otherwise.
///
/// Attendance marking is a learner action; admins author questions but do
/// not attend.
pub struct RequireLearner(pub AuthUser);

impl FromRequestParts<AppState> for RequireLearner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_USER {
            return Err(AppError::Forbidden("Learner role required".into()));
        }
        Ok(RequireLearner(user))
    }
}
