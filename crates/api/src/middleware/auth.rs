//! HTTP Basic authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use hostwatch_core::error::CoreError;
use hostwatch_core::types::DbId;
use hostwatch_db::repositories::UserRepo;

use crate::auth::basic::parse_basic;
use crate::auth::password::verify_password;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from Basic credentials in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Unknown users, wrong passwords and inactive accounts are all rejected
/// with the same 401 so callers cannot tell which usernames exist.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let credentials = parse_basic(auth_header).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Basic <credentials>".into(),
            ))
        })?;

        let invalid = || AppError::Core(CoreError::Unauthorized("Invalid credentials".into()));

        let user = UserRepo::find_by_username(&state.pool, &credentials.username)
            .await?
            .ok_or_else(invalid)?;

        let matches = verify_password(&credentials.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;

        if !matches || !user.is_active {
            tracing::debug!(username = %credentials.username, "Rejected Basic credentials");
            return Err(invalid());
        }

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
        })
    }
}
