//! Handlers for the `/plugins` resource.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;
use hostwatch_db::models::plugin::UpdatePluginSetting;
use hostwatch_db::repositories::PluginRepo;

use crate::error::AppResult;
use crate::extract::FormOrJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/plugins
///
/// Every plugin setting with the plugin's metadata; `meta` is `{}` for a
/// stored plugin that is no longer compiled in.
pub async fn list_plugins(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let settings = PluginRepo::list(&state.pool).await?;
    let data: Vec<Value> = settings
        .into_iter()
        .map(|setting| {
            let meta = state
                .plugins
                .plugin_meta(&setting.plugin_name)
                .map(|m| serde_json::to_value(m).unwrap_or_default())
                .unwrap_or_else(|| serde_json::json!({}));
            serde_json::json!({
                "name": setting.plugin_name,
                "is_active": setting.is_active,
                "meta": meta,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({ "data": data })))
}

/// PUT /api/v1/plugins/{name}
///
/// Switch a plugin on or off. Unknown plugins answer 404.
pub async fn update_plugin(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
    FormOrJson(input): FormOrJson<UpdatePluginSetting>,
) -> AppResult<Json<Value>> {
    let setting = PluginRepo::set_active(&state.pool, &name, input.is_active)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    tracing::info!(
        plugin = %setting.plugin_name,
        is_active = setting.is_active,
        user_id = auth.user_id,
        "Plugin setting changed"
    );
    Ok(Json(serde_json::json!({ "data": setting })))
}
