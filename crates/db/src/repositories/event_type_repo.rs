//! Repository for the `event_types` table.

use sqlx::PgPool;
use hostwatch_core::slug::slugify;
use hostwatch_core::types::DbId;

use crate::models::event::{EventType, UpdateEventType};

/// Column list for `event_types` queries.
const COLUMNS: &str =
    "id, name, name_slug, user_id, alert_level, notify, category_id, created_at, updated_at";

/// Provides CRUD operations for event types.
pub struct EventTypeRepo;

impl EventTypeRepo {
    /// Return the user's type called `name`, creating it on first use.
    ///
    /// New types start with no alert and notifications off. Concurrent
    /// reports naming the same new type resolve to a single row.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
    ) -> Result<EventType, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_types (name, name_slug, user_id)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_event_types_user_name
             DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventType>(&query)
            .bind(name)
            .bind(slugify(name))
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a type by ID. Used by background services, not ownership-scoped.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<EventType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_types WHERE id = $1");
        sqlx::query_as::<_, EventType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<EventType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_types WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, EventType>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EventType>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM event_types WHERE user_id = $1 ORDER BY name, id");
        sqlx::query_as::<_, EventType>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Change alert level, notify flag or category. The name and slug are fixed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateEventType,
    ) -> Result<Option<EventType>, sqlx::Error> {
        let query = format!(
            "UPDATE event_types SET
                alert_level = COALESCE($3, alert_level),
                notify = COALESCE($4, notify),
                category_id = CASE WHEN $6 THEN NULL ELSE COALESCE($5, category_id) END,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventType>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.alert_level.map(i16::from))
            .bind(input.notify)
            .bind(input.category_id)
            .bind(input.clear_category)
            .fetch_optional(pool)
            .await
    }

    /// Delete a type together with its events and their comments (cascade).
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM event_types WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
