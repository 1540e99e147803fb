//! Repository for the `event_comments` table.

use sqlx::PgPool;
use hostwatch_core::types::DbId;

use crate::models::event::EventComment;

/// Column list for `event_comments` queries.
const COLUMNS: &str = "id, comment, user_name, timestamp, event_id";

pub struct EventCommentRepo;

impl EventCommentRepo {
    /// Attach a comment to an event, stamped with the current time.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        user_name: &str,
        comment: &str,
    ) -> Result<EventComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_comments (comment, user_name, event_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventComment>(&query)
            .bind(comment)
            .bind(user_name)
            .bind(event_id)
            .fetch_one(pool)
            .await
    }

    /// Comments on an event, oldest first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<EventComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM event_comments WHERE event_id = $1 ORDER BY timestamp, id"
        );
        sqlx::query_as::<_, EventComment>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }
}
