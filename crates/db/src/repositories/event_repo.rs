//! Repository for the `events` table.
//!
//! An event belongs to whoever owns its source host, so ownership checks
//! join through `hosts`.

use sqlx::{PgExecutor, PgPool};
use hostwatch_core::slug::slugify;
use hostwatch_core::types::DbId;

use crate::models::event::{Event, EventFilter, EventListItem, EventWithContext, NewEvent};

/// Column list for `events` queries.
const COLUMNS: &str = "id, message, short_message, message_slug, timestamp, protocol, \
                       event_type_id, source_host_id, fields_class, fields_data, checked, \
                       created_at";

/// Same columns qualified with the `e` alias used in joins.
const JOINED_COLUMNS: &str = "e.id, e.message, e.short_message, e.message_slug, e.timestamp, \
                              e.protocol, e.event_type_id, e.source_host_id, e.fields_class, \
                              e.fields_data, e.checked, e.created_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a reported event. The message slug is derived from the short
    /// message here and never recomputed. The event is marked as awaiting a
    /// notification when its type notifies.
    pub async fn create(pool: &PgPool, input: &NewEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (message, short_message, message_slug, timestamp, protocol, \
                                 event_type_id, source_host_id, fields_class, fields_data, \
                                 notify_pending)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                     COALESCE((SELECT notify FROM event_types WHERE id = $6), false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.message)
            .bind(&input.short_message)
            .bind(slugify(&input.short_message))
            .bind(input.timestamp)
            .bind(&input.protocol)
            .bind(input.event_type_id)
            .bind(input.source_host_id)
            .bind(&input.fields_class)
            .bind(&input.fields_data)
            .fetch_one(pool)
            .await
    }

    /// Load an event with its type name, owner and timezones, unscoped.
    pub async fn find_with_context(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EventWithContext>, sqlx::Error> {
        Self::fetch_with_context(pool, id, None).await
    }

    /// Load an event of `user_id` with its type name and timezones.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<EventWithContext>, sqlx::Error> {
        Self::fetch_with_context(pool, id, Some(user_id)).await
    }

    async fn fetch_with_context(
        pool: &PgPool,
        id: DbId,
        user_id: Option<DbId>,
    ) -> Result<Option<EventWithContext>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS},
                    t.name AS event_type_name,
                    h.user_id AS owner_id,
                    h.timezone AS host_timezone,
                    COALESCE(p.timezone, '') AS owner_timezone
             FROM events e
             JOIN event_types t ON t.id = e.event_type_id
             JOIN hosts h ON h.id = e.source_host_id
             LEFT JOIN user_profiles p ON p.user_id = h.user_id
             WHERE e.id = $1 AND ($2::BIGINT IS NULL OR h.user_id = $2)"
        );
        sqlx::query_as::<_, EventWithContext>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List events of `user_id`, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        filter: &EventFilter,
    ) -> Result<Vec<EventListItem>, sqlx::Error> {
        let pending = if filter.pending_only {
            "AND e.checked = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT e.id, e.short_message AS short_description
             FROM events e
             JOIN hosts h ON h.id = e.source_host_id
             WHERE h.user_id = $1
               AND ($2::BIGINT IS NULL OR e.event_type_id = $2)
               {pending}
             ORDER BY e.timestamp DESC, e.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, EventListItem>(&query)
            .bind(user_id)
            .bind(filter.event_type_id)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Ids of events still waiting for their notification, oldest first.
    pub async fn list_notify_pending(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM events WHERE notify_pending ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Clear the pending-notification flag. Returns `true` only for the
    /// caller that actually cleared it.
    pub async fn take_notify_pending<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE events SET notify_pending = false WHERE id = $1 AND notify_pending",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the `checked` flag. Returns `true` if the event belongs to `user_id`.
    pub async fn set_checked(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        checked: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE events e SET checked = $3
             FROM hosts h
             WHERE e.id = $1 AND h.id = e.source_host_id AND h.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .bind(checked)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an event and its comments.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM events e USING hosts h
             WHERE e.id = $1 AND h.id = e.source_host_id AND h.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
