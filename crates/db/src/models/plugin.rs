//! Plugin switches and per-user dashboard layout.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use hostwatch_core::types::{DbId, Timestamp};

/// A row from the `plugin_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PluginSetting {
    pub id: DbId,
    pub plugin_name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `dashboards` table. One per user, created lazily.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dashboard {
    pub id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// A widget placed on a dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WidgetSetting {
    pub id: DbId,
    pub dashboard_id: DbId,
    pub widget_class: String,
    #[serde(rename = "column")]
    pub column_number: i16,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWidgetSetting {
    pub column: i16,
    pub widget_class: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePluginSetting {
    pub is_active: bool,
}
