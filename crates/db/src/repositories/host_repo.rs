//! Repository for the `hosts` table.

use sqlx::PgPool;
use hostwatch_core::types::DbId;

use crate::models::host::{CreateHost, Host, HostListItem, UpdateHost, DEFAULT_HOST_TIMEZONE};

/// Column list for `hosts` queries.
const COLUMNS: &str =
    "id, user_id, name, description, ipv4, ipv6, timezone, created_at, updated_at";

/// Provides CRUD operations for hosts.
pub struct HostRepo;

impl HostRepo {
    /// Insert a host owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateHost,
    ) -> Result<Host, sqlx::Error> {
        let query = format!(
            "INSERT INTO hosts (user_id, name, description, ipv4, ipv6, timezone)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Host>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(input.ipv4.as_deref().unwrap_or(""))
            .bind(input.ipv6.as_deref().unwrap_or(""))
            .bind(input.timezone.as_deref().unwrap_or(DEFAULT_HOST_TIMEZONE))
            .fetch_one(pool)
            .await
    }

    /// Find a host by ID among the hosts of `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Host>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hosts WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Host>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Id and name of every host of `user_id`, ordered by name.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<HostListItem>, sqlx::Error> {
        sqlx::query_as::<_, HostListItem>(
            "SELECT id, name FROM hosts WHERE user_id = $1 ORDER BY name, id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Find a host of `user_id` reporting from either address.
    ///
    /// Empty addresses never match. When both match different hosts, the
    /// IPv4 match wins.
    pub async fn find_by_address(
        pool: &PgPool,
        user_id: DbId,
        ipv4: &str,
        ipv6: &str,
    ) -> Result<Option<Host>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hosts
             WHERE user_id = $1
               AND (($2 <> '' AND ipv4 = $2) OR ($3 <> '' AND lower(ipv6) = lower($3)))
             ORDER BY ($2 <> '' AND ipv4 = $2) DESC, id
             LIMIT 1"
        );
        sqlx::query_as::<_, Host>(&query)
            .bind(user_id)
            .bind(ipv4)
            .bind(ipv6)
            .fetch_optional(pool)
            .await
    }

    /// Update a host. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateHost,
    ) -> Result<Option<Host>, sqlx::Error> {
        let query = format!(
            "UPDATE hosts SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                ipv4 = COALESCE($5, ipv4),
                ipv6 = COALESCE($6, ipv6),
                timezone = COALESCE($7, timezone),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Host>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.ipv4)
            .bind(&input.ipv6)
            .bind(&input.timezone)
            .fetch_optional(pool)
            .await
    }

    /// Delete a host and, by cascade, its events. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hosts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
