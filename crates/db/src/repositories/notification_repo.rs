//! Repository for the `notifications` table.
//!
//! A row exists while the notification is waiting for delivery; dispatch
//! deletes it once sent.

use sqlx::{PgConnection, PgExecutor, PgPool};
use hostwatch_core::types::DbId;

use crate::models::notification::{NewNotification, Notification, PendingDelivery};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, title, content, user_id, related_type, related_id, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Queue a notification, returning the stored row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &NewNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (title, content, user_id, related_type, related_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.user_id)
            .bind(input.related.map(|r| r.kind.as_str()))
            .bind(input.related.map(|r| r.id))
            .fetch_one(executor)
            .await
    }

    /// Find a notification of `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Queued notifications of a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every queued notification with its recipient, oldest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<PendingDelivery>, sqlx::Error> {
        sqlx::query_as::<_, PendingDelivery>(
            "SELECT n.id, n.title, n.content, n.user_id, n.related_type, n.related_id, \
                    n.created_at, u.username, u.email \
             FROM notifications n \
             JOIN users u ON u.id = n.user_id \
             ORDER BY n.created_at, n.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Lock the oldest queued notification not in `skip` and not locked by
    /// another transaction.
    ///
    /// The row stays locked until `conn`'s transaction ends, so concurrent
    /// dispatch runs never hand the same notification to the transport.
    pub async fn claim_next(
        conn: &mut PgConnection,
        skip: &[DbId],
    ) -> Result<Option<PendingDelivery>, sqlx::Error> {
        sqlx::query_as::<_, PendingDelivery>(
            "SELECT n.id, n.title, n.content, n.user_id, n.related_type, n.related_id, \
                    n.created_at, u.username, u.email \
             FROM notifications n \
             JOIN users u ON u.id = n.user_id \
             WHERE n.id <> ALL($1) \
             ORDER BY n.created_at, n.id \
             LIMIT 1 \
             FOR UPDATE OF n SKIP LOCKED",
        )
        .bind(skip)
        .fetch_optional(conn)
        .await
    }

    /// Delete a notification of `user_id`. Returns `true` if a row was removed.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a delivered notification.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
