//! Handlers for the `/event-types` resource.
//!
//! Types are created implicitly by event reports; here the owner tunes
//! their alert level, notification flag and category.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hostwatch_core::error::CoreError;
use hostwatch_core::search::{clamp_limit, clamp_offset};
use hostwatch_core::types::DbId;
use hostwatch_db::models::event::{EventFilter, EventType, UpdateEventType};
use hostwatch_db::repositories::{EventRepo, EventTypeCategoryRepo, EventTypeRepo};
use hostwatch_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::FormOrJson;
use crate::middleware::auth::AuthUser;
use crate::query::{PaginationParams, DEFAULT_LIMIT, MAX_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "EventType",
        id,
    })
}

async fn owned_type(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<EventType> {
    EventTypeRepo::find_for_user(pool, id, user_id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/event-types
pub async fn list_event_types(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EventType>>>> {
    let types = EventTypeRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: types }))
}

/// GET /api/v1/event-types/{id}
pub async fn get_event_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EventType>>> {
    let event_type = owned_type(&state.pool, id, auth.user_id).await?;
    Ok(Json(DataResponse { data: event_type }))
}

/// PUT /api/v1/event-types/{id}
///
/// Accepts `alert_level` (0-3), `notify`, `category_id` and `clear_category`.
pub async fn update_event_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormOrJson(input): FormOrJson<UpdateEventType>,
) -> AppResult<Json<DataResponse<EventType>>> {
    if let Some(category_id) = input.category_id {
        EventTypeCategoryRepo::find_for_user(&state.pool, category_id, auth.user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "EventTypeCategory",
                id: category_id,
            }))?;
    }

    let event_type = EventTypeRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        event_type_id = id,
        alert_level = event_type.alert_level,
        notify = event_type.notify,
        "Event type updated"
    );
    Ok(Json(DataResponse { data: event_type }))
}

/// DELETE /api/v1/event-types/{id}
///
/// Also deletes every event of this type and their comments.
pub async fn delete_event_type(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !EventTypeRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(not_found(id));
    }
    tracing::info!(event_type_id = id, user_id = auth.user_id, "Event type deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/event-types/{id}/events
pub async fn list_type_events(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<serde_json::Value>> {
    type_events(&state.pool, id, auth.user_id, params, false).await
}

/// GET /api/v1/event-types/{id}/pending
///
/// Events of this type that have not been checked yet.
pub async fn list_pending_events(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<serde_json::Value>> {
    type_events(&state.pool, id, auth.user_id, params, true).await
}

async fn type_events(
    pool: &DbPool,
    id: DbId,
    user_id: DbId,
    params: PaginationParams,
    pending_only: bool,
) -> AppResult<Json<serde_json::Value>> {
    let event_type = owned_type(pool, id, user_id).await?;
    let filter = EventFilter {
        event_type_id: Some(event_type.id),
        pending_only,
        limit: clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let events = EventRepo::list_for_user(pool, user_id, &filter).await?;
    Ok(Json(serde_json::json!({ "events": events })))
}
