//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hostwatch_core::error::CoreError;
use hostwatch_core::search::{clamp_limit, clamp_offset};
use hostwatch_core::types::DbId;
use hostwatch_db::models::notification::Notification;
use hostwatch_db::repositories::NotificationRepo;
use hostwatch_events::DispatchReport;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{PaginationParams, DEFAULT_LIMIT, MAX_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications
///
/// The caller's queued notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let notifications =
        NotificationRepo::list_for_user(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// DELETE /api/v1/notifications/{id}
///
/// Drop a queued notification without sending it.
pub async fn delete_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NotificationRepo::delete_for_user(&state.pool, id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/dispatch
///
/// Send every queued notification now. Returns `{"sent", "failed"}`.
pub async fn dispatch_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DispatchReport>> {
    tracing::info!(user_id = auth.user_id, "Manual notification dispatch");
    let report = state.dispatcher.dispatch().await?;
    Ok(Json(report))
}
