//! Handlers for the `/hosts` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and only see the
//! caller's hosts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hostwatch_core::error::CoreError;
use hostwatch_core::timezone::parse_timezone;
use hostwatch_core::types::DbId;
use hostwatch_db::models::host::{CreateHost, HostDetail, UpdateHost};
use hostwatch_db::repositories::HostRepo;

use crate::error::{AppError, AppResult};
use crate::extract::FormOrJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum length of a host or network name.
pub const MAX_NAME_LEN: usize = 250;

/// Maximum length of a stored address.
pub(crate) const MAX_ADDRESS_LEN: usize = 39;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Host", id })
}

pub(crate) fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("name: This field is required.".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "name: Ensure this value has at most {MAX_NAME_LEN} characters."
        )));
    }
    Ok(())
}

fn validate_host_fields(
    ipv4: Option<&str>,
    ipv6: Option<&str>,
    timezone: Option<&str>,
) -> Result<(), CoreError> {
    for (field, value) in [("ipv4", ipv4), ("ipv6", ipv6)] {
        if value.is_some_and(|v| v.chars().count() > MAX_ADDRESS_LEN) {
            return Err(CoreError::Validation(format!(
                "{field}: Ensure this value has at most {MAX_ADDRESS_LEN} characters."
            )));
        }
    }
    if let Some(tz) = timezone {
        parse_timezone(tz)?;
    }
    Ok(())
}

/// GET /api/v1/hosts/list
///
/// Returns `{"hosts": [{"id", "name"}]}`.
pub async fn list_hosts(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let hosts = HostRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "hosts": hosts })))
}

/// POST /api/v1/hosts
pub async fn create_host(
    auth: AuthUser,
    State(state): State<AppState>,
    FormOrJson(input): FormOrJson<CreateHost>,
) -> AppResult<(StatusCode, Json<HostDetail>)> {
    validate_name(&input.name)?;
    validate_host_fields(
        input.ipv4.as_deref(),
        input.ipv6.as_deref(),
        input.timezone.as_deref(),
    )?;

    let host = HostRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(host_id = host.id, user_id = auth.user_id, "Host created");

    Ok((StatusCode::CREATED, Json(HostDetail::from(host))))
}

/// GET /api/v1/hosts/{id}
///
/// Returns `{host_id, name, description, ipv4, ipv6, timezone}`.
pub async fn get_host(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<HostDetail>> {
    let host = HostRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(HostDetail::from(host)))
}

/// PUT /api/v1/hosts/{id}
pub async fn update_host(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormOrJson(input): FormOrJson<UpdateHost>,
) -> AppResult<Json<HostDetail>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    validate_host_fields(
        input.ipv4.as_deref(),
        input.ipv6.as_deref(),
        input.timezone.as_deref(),
    )?;

    let host = HostRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(HostDetail::from(host)))
}

/// DELETE /api/v1/hosts/{id}
///
/// Removes the host together with the events it reported.
pub async fn delete_host(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !HostRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(not_found(id));
    }
    tracing::info!(host_id = id, user_id = auth.user_id, "Host deleted");
    Ok(StatusCode::NO_CONTENT)
}
