//! Repository for the `event_type_categories` table.

use sqlx::PgPool;
use hostwatch_core::slug::slugify;
use hostwatch_core::types::DbId;

use crate::models::event::{
    CreateEventTypeCategory, EventTypeCategory, UpdateEventTypeCategory,
};

/// Column list for `event_type_categories` queries.
const COLUMNS: &str = "id, name, slug, user_id, parent_id, created_at, updated_at";

/// Provides CRUD operations for event type categories.
pub struct EventTypeCategoryRepo;

impl EventTypeCategoryRepo {
    /// Insert a category. The slug is derived from the name here and never
    /// recomputed.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateEventTypeCategory,
    ) -> Result<EventTypeCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_type_categories (name, slug, user_id, parent_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventTypeCategory>(&query)
            .bind(&input.name)
            .bind(slugify(&input.name))
            .bind(user_id)
            .bind(input.parent_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<EventTypeCategory>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM event_type_categories WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, EventTypeCategory>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Ids of `id` and every category above it on the parent chain.
    pub async fn chain_ids(pool: &PgPool, id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "WITH RECURSIVE chain (id, parent_id) AS (
                 SELECT id, parent_id FROM event_type_categories WHERE id = $1
                 UNION
                 SELECT c.id, c.parent_id
                 FROM event_type_categories c
                 JOIN chain ON c.id = chain.parent_id
             )
             SELECT id FROM chain",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EventTypeCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM event_type_categories WHERE user_id = $1 ORDER BY name, id"
        );
        sqlx::query_as::<_, EventTypeCategory>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Rename or re-parent a category. The slug is left untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateEventTypeCategory,
    ) -> Result<Option<EventTypeCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE event_type_categories SET
                name = COALESCE($3, name),
                parent_id = CASE WHEN $5 THEN NULL ELSE COALESCE($4, parent_id) END,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventTypeCategory>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.parent_id)
            .bind(input.clear_parent)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM event_type_categories WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
