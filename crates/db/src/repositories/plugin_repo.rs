//! Repository for the `plugin_settings` table.

use sqlx::PgPool;

use crate::models::plugin::PluginSetting;

/// Column list for `plugin_settings` queries.
const COLUMNS: &str = "id, plugin_name, is_active, created_at, updated_at";

pub struct PluginRepo;

impl PluginRepo {
    /// Make sure every registered plugin has a settings row. New rows start active.
    pub async fn ensure(pool: &PgPool, names: &[&str]) -> Result<(), sqlx::Error> {
        for name in names {
            sqlx::query(
                "INSERT INTO plugin_settings (plugin_name) VALUES ($1)
                 ON CONFLICT ON CONSTRAINT uq_plugin_settings_name DO NOTHING",
            )
            .bind(name)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<PluginSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM plugin_settings ORDER BY plugin_name");
        sqlx::query_as::<_, PluginSetting>(&query).fetch_all(pool).await
    }

    /// Names of the active plugins.
    pub async fn active_names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT plugin_name FROM plugin_settings WHERE is_active ORDER BY plugin_name",
        )
        .fetch_all(pool)
        .await
    }

    /// Switch a plugin on or off. Returns `None` when no such row exists.
    pub async fn set_active(
        pool: &PgPool,
        name: &str,
        is_active: bool,
    ) -> Result<Option<PluginSetting>, sqlx::Error> {
        let query = format!(
            "UPDATE plugin_settings SET is_active = $2, updated_at = NOW()
             WHERE plugin_name = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PluginSetting>(&query)
            .bind(name)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }
}
