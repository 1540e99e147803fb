//! Repository for the `networks` and `network_hosts` tables.

use sqlx::PgPool;
use hostwatch_core::types::DbId;

use crate::models::network::{CreateNetwork, Network, NetworkListItem, UpdateNetwork};

/// Column list for `networks` queries.
const COLUMNS: &str = "id, user_id, name, description, created_at, updated_at";

/// Provides CRUD operations for networks and their membership.
pub struct NetworkRepo;

impl NetworkRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateNetwork,
    ) -> Result<Network, sqlx::Error> {
        let query = format!(
            "INSERT INTO networks (user_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Network>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.description.as_deref().unwrap_or(""))
            .fetch_one(pool)
            .await
    }

    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Network>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM networks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Network>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<NetworkListItem>, sqlx::Error> {
        sqlx::query_as::<_, NetworkListItem>(
            "SELECT id, name FROM networks WHERE user_id = $1 ORDER BY name, id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Update a network. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateNetwork,
    ) -> Result<Option<Network>, sqlx::Error> {
        let query = format!(
            "UPDATE networks SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Network>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM networks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Ids of the hosts in a network, ascending.
    pub async fn host_ids(pool: &PgPool, network_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT host_id FROM network_hosts WHERE network_id = $1 ORDER BY host_id",
        )
        .bind(network_id)
        .fetch_all(pool)
        .await
    }

    /// Add a host to a network. Adding an existing member is a no-op.
    pub async fn add_host(
        pool: &PgPool,
        network_id: DbId,
        host_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO network_hosts (network_id, host_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(network_id)
        .bind(host_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a host from a network. Returns `true` if it was a member.
    pub async fn remove_host(
        pool: &PgPool,
        network_id: DbId,
        host_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM network_hosts WHERE network_id = $1 AND host_id = $2")
                .bind(network_id)
                .bind(host_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
