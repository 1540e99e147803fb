//! Handlers for the `/networks` resource and network membership.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hostwatch_core::error::CoreError;
use hostwatch_core::types::DbId;
use hostwatch_db::models::network::{CreateNetwork, Network, NetworkDetail, UpdateNetwork};
use hostwatch_db::repositories::{HostRepo, NetworkRepo};
use hostwatch_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::FormOrJson;
use crate::handlers::hosts::validate_name;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Network",
        id,
    })
}

async fn detail(pool: &DbPool, network: Network) -> AppResult<NetworkDetail> {
    let hosts = NetworkRepo::host_ids(pool, network.id).await?;
    Ok(NetworkDetail {
        network_id: network.id,
        name: network.name,
        description: network.description,
        hosts,
    })
}

/// Load a network of the caller or fail with 404.
async fn owned_network(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<Network> {
    NetworkRepo::find_for_user(pool, id, user_id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/networks/list
///
/// Returns `{"networks": [{"id", "name"}]}`.
pub async fn list_networks(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let networks = NetworkRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(serde_json::json!({ "networks": networks })))
}

/// POST /api/v1/networks
pub async fn create_network(
    auth: AuthUser,
    State(state): State<AppState>,
    FormOrJson(input): FormOrJson<CreateNetwork>,
) -> AppResult<(StatusCode, Json<NetworkDetail>)> {
    validate_name(&input.name)?;
    let network = NetworkRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(network_id = network.id, user_id = auth.user_id, "Network created");
    Ok((StatusCode::CREATED, Json(detail(&state.pool, network).await?)))
}

/// GET /api/v1/networks/{id}
///
/// Returns `{network_id, name, description, hosts: [host ids]}`.
pub async fn get_network(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<NetworkDetail>> {
    let network = owned_network(&state.pool, id, auth.user_id).await?;
    Ok(Json(detail(&state.pool, network).await?))
}

/// PUT /api/v1/networks/{id}
pub async fn update_network(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormOrJson(input): FormOrJson<UpdateNetwork>,
) -> AppResult<Json<NetworkDetail>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    let network = NetworkRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(detail(&state.pool, network).await?))
}

/// DELETE /api/v1/networks/{id}
pub async fn delete_network(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NetworkRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/networks/{id}/hosts/{host_id}
///
/// Both the network and the host must belong to the caller.
pub async fn add_host(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, host_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<NetworkDetail>> {
    let network = owned_network(&state.pool, id, auth.user_id).await?;
    HostRepo::find_for_user(&state.pool, host_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Host",
            id: host_id,
        }))?;

    NetworkRepo::add_host(&state.pool, network.id, host_id).await?;
    Ok(Json(detail(&state.pool, network).await?))
}

/// DELETE /api/v1/networks/{id}/hosts/{host_id}
pub async fn remove_host(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, host_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let network = owned_network(&state.pool, id, auth.user_id).await?;
    if !NetworkRepo::remove_host(&state.pool, network.id, host_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Host",
            id: host_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
