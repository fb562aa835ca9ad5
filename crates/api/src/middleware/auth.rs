//! Trusted-identity extractor for Axum handlers.
//!
//! Authentication itself is owned by the upstream gateway: requests arrive
//! with the caller already resolved, carried in `x-user-id` and
//! `x-user-role` headers. The engine trusts these headers and never checks
//! credentials. The caller's current level is always re-read from storage,
//! never taken from a header, so it cannot go stale mid-window.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cadence_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the resolved user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the resolved role name.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Identity resolved by the gateway.
///
/// Use this as an extractor parameter in any handler that requires an
/// authenticated caller:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The user's role name (`"user"` or `"admin"`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {USER_ID_HEADER} header")))?
            .parse::<DbId>()
            .map_err(|_| {
                AppError::Unauthorized(format!("{USER_ID_HEADER} must be a numeric id"))
            })?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {USER_ROLE_HEADER} header")))?
            .to_string();

        Ok(AuthUser { user_id, role })
    }
}
