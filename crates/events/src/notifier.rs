//! Queues notifications for reported events.
//!
//! [`AlertNotifier`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and, for every event whose type has `notify` set, stores a notification
//! for the owner of the source host. Delivery happens later, in the
//! [`Dispatcher`](crate::dispatcher::Dispatcher).
//!
//! The bus only wakes the notifier up. Which events still need a
//! notification is recorded on the event row itself (`notify_pending`), so
//! events skipped while the notifier lagged or was not running are picked up
//! by [`AlertNotifier::catch_up`].

use tokio::sync::broadcast;
use hostwatch_core::related::{RelatedKind, RelatedRef};
use hostwatch_core::render::{event_html, event_title};
use hostwatch_core::types::DbId;
use hostwatch_db::models::notification::NewNotification;
use hostwatch_db::repositories::{EventRepo, NotificationRepo};
use hostwatch_db::DbPool;

use crate::bus::ReportedEvent;

/// Background service that turns reported events into queued notifications.
pub struct AlertNotifier;

impl AlertNotifier {
    /// Run the notifier loop until the bus is dropped.
    ///
    /// Events left pending by an earlier run are queued first.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<ReportedEvent>) {
        Self::catch_up_logged(&pool).await;

        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::notify(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            event_id = event.event_id,
                            "Failed to queue notification"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Alert notifier lagged, rescanning pending events");
                    Self::catch_up_logged(&pool).await;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, alert notifier shutting down");
                    break;
                }
            }
        }
    }

    /// Queue a notification for one event.
    ///
    /// Returns the notification id, or `None` when the event's type does not
    /// notify, the event no longer exists, or its notification was already
    /// queued.
    pub async fn notify(pool: &DbPool, event: &ReportedEvent) -> Result<Option<DbId>, sqlx::Error> {
        if !event.notify {
            return Ok(None);
        }
        Self::queue_pending(pool, event.event_id).await
    }

    /// Queue notifications for every event still marked pending.
    ///
    /// Returns how many notifications were queued.
    pub async fn catch_up(pool: &DbPool) -> Result<usize, sqlx::Error> {
        let mut queued = 0;
        for event_id in EventRepo::list_notify_pending(pool).await? {
            if Self::queue_pending(pool, event_id).await?.is_some() {
                queued += 1;
            }
        }
        Ok(queued)
    }

    async fn catch_up_logged(pool: &DbPool) {
        match Self::catch_up(pool).await {
            Ok(0) => {}
            Ok(queued) => tracing::info!(queued, "Queued notifications for pending events"),
            Err(e) => tracing::error!(error = %e, "Failed to queue pending notifications"),
        }
    }

    /// Clear the event's pending flag and store its notification in one
    /// transaction, so each event yields at most one notification.
    async fn queue_pending(pool: &DbPool, event_id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        let Some(row) = EventRepo::find_with_context(pool, event_id).await? else {
            tracing::warn!(event_id, "Reported event vanished before notify");
            return Ok(None);
        };

        let mut tx = pool.begin().await?;
        if !EventRepo::take_notify_pending(&mut *tx, event_id).await? {
            return Ok(None);
        }
        let notification = NotificationRepo::create(
            &mut *tx,
            &NewNotification {
                title: event_title(row.event.timestamp, &row.event_type_name),
                content: event_html(row.event.timestamp, &row.event_type_name, &row.event.message),
                user_id: row.owner_id,
                related: Some(RelatedRef::new(RelatedKind::Event, row.event.id)),
            },
        )
        .await?;
        tx.commit().await?;

        tracing::debug!(
            notification_id = notification.id,
            event_id,
            user_id = row.owner_id,
            "Notification queued"
        );
        Ok(Some(notification.id))
    }
}
