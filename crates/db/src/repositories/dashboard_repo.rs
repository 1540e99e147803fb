//! Repository for the `dashboards` and `widget_settings` tables.

use sqlx::PgPool;
use hostwatch_core::types::DbId;

use crate::models::plugin::{Dashboard, WidgetSetting};

/// Column list for `widget_settings` queries.
const WIDGET_COLUMNS: &str = "id, dashboard_id, widget_class, column_number, created_at";

pub struct DashboardRepo;

impl DashboardRepo {
    /// The dashboard of a user, created on first access.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<Dashboard, sqlx::Error> {
        sqlx::query_as::<_, Dashboard>(
            "INSERT INTO dashboards (user_id) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_dashboards_user
             DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING id, user_id, created_at",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Widgets on a dashboard ordered by column, then placement.
    pub async fn list_widgets(
        pool: &PgPool,
        dashboard_id: DbId,
    ) -> Result<Vec<WidgetSetting>, sqlx::Error> {
        let query = format!(
            "SELECT {WIDGET_COLUMNS} FROM widget_settings
             WHERE dashboard_id = $1
             ORDER BY column_number, id"
        );
        sqlx::query_as::<_, WidgetSetting>(&query)
            .bind(dashboard_id)
            .fetch_all(pool)
            .await
    }

    pub async fn add_widget(
        pool: &PgPool,
        dashboard_id: DbId,
        widget_class: &str,
        column: i16,
    ) -> Result<WidgetSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO widget_settings (dashboard_id, widget_class, column_number)
             VALUES ($1, $2, $3)
             RETURNING {WIDGET_COLUMNS}"
        );
        sqlx::query_as::<_, WidgetSetting>(&query)
            .bind(dashboard_id)
            .bind(widget_class)
            .bind(column)
            .fetch_one(pool)
            .await
    }

    /// Remove a widget from a dashboard. Returns `true` if it was there.
    pub async fn remove_widget(
        pool: &PgPool,
        dashboard_id: DbId,
        widget_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM widget_settings WHERE id = $1 AND dashboard_id = $2")
                .bind(widget_id)
                .bind(dashboard_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
