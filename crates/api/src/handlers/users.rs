//! Handlers for the `/users` resource: registration and the caller's own
//! account and profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hostwatch_core::error::CoreError;
use hostwatch_core::registration::{ProfileSettings, Registration, UserDetails};
use hostwatch_db::models::user::{CreateUser, UserResponse};
use hostwatch_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::FormOrJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Message returned when an e-mail address is already registered.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Account with this e-mail address already exists.";

/// POST /api/v1/users/register
///
/// Create an inactive account with its profile. The account cannot
/// authenticate until it is activated.
pub async fn register(
    State(state): State<AppState>,
    FormOrJson(input): FormOrJson<Registration>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;

    if UserRepo::email_taken(&state.pool, &input.email, None).await? {
        return Err(AppError::Core(CoreError::Conflict(
            DUPLICATE_EMAIL_MESSAGE.into(),
        )));
    }

    let password_hash = hash_password(&input.password1)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            is_active: false,
            timezone: input.timezone,
            skype: input.skype,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// GET /api/v1/users/me
pub async fn get_me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    let profile = UserRepo::find_profile(&state.pool, auth.user_id).await?;

    Ok(Json(serde_json::json!({
        "data": {
            "user": UserResponse::from(user),
            "profile": profile,
        }
    })))
}

/// PUT /api/v1/users/me
///
/// Replace first name, last name and e-mail address.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    FormOrJson(input): FormOrJson<UserDetails>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;

    if UserRepo::email_taken(&state.pool, &input.email, Some(auth.user_id)).await? {
        return Err(AppError::Core(CoreError::Conflict(
            DUPLICATE_EMAIL_MESSAGE.into(),
        )));
    }

    let user = UserRepo::update_details(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PUT /api/v1/users/me/profile
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    FormOrJson(input): FormOrJson<ProfileSettings>,
) -> AppResult<Json<serde_json::Value>> {
    input.validate()?;

    let profile = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "UserProfile",
            id: auth.user_id,
        }))?;

    Ok(Json(serde_json::json!({ "data": profile })))
}
