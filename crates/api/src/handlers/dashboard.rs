//! Handlers for the caller's dashboard widgets.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hostwatch_core::error::CoreError;
use hostwatch_core::plugins::{validate_column, WidgetInfo};
use hostwatch_core::types::DbId;
use hostwatch_db::models::plugin::{CreateWidgetSetting, WidgetSetting};
use hostwatch_db::repositories::{DashboardRepo, PluginRepo};

use crate::error::{AppError, AppResult};
use crate::extract::FormOrJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/widgets
pub async fn list_widgets(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<WidgetSetting>>>> {
    let dashboard = DashboardRepo::get_or_create(&state.pool, auth.user_id).await?;
    let widgets = DashboardRepo::list_widgets(&state.pool, dashboard.id).await?;
    Ok(Json(DataResponse { data: widgets }))
}

/// GET /api/v1/dashboard/widgets/choices
///
/// Widgets the caller may place: those of active plugins only.
pub async fn widget_choices(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<WidgetInfo>>>> {
    let active = PluginRepo::active_names(&state.pool).await?;
    Ok(Json(DataResponse {
        data: state.plugins.widget_choices(&active),
    }))
}

/// POST /api/v1/dashboard/widgets
///
/// Body: `{"column": 1|2, "widget_class": "..."}`.
pub async fn add_widget(
    auth: AuthUser,
    State(state): State<AppState>,
    FormOrJson(input): FormOrJson<CreateWidgetSetting>,
) -> AppResult<(StatusCode, Json<DataResponse<WidgetSetting>>)> {
    validate_column(input.column)?;
    let active = PluginRepo::active_names(&state.pool).await?;
    state
        .plugins
        .validate_widget_class(&input.widget_class, &active)?;

    let dashboard = DashboardRepo::get_or_create(&state.pool, auth.user_id).await?;
    let widget =
        DashboardRepo::add_widget(&state.pool, dashboard.id, &input.widget_class, input.column)
            .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: widget })))
}

/// DELETE /api/v1/dashboard/widgets/{id}
pub async fn remove_widget(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let dashboard = DashboardRepo::get_or_create(&state.pool, auth.user_id).await?;
    if !DashboardRepo::remove_widget(&state.pool, dashboard.id, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "WidgetSetting",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
