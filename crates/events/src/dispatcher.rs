//! Delivery of queued notifications.
//!
//! [`Dispatcher::dispatch`] sends every queued notification through the
//! configured [`Transport`]. A notification is deleted once sent and stays
//! queued when delivery fails, so the next run retries it.
//! [`DispatchScheduler`] repeats the dispatch on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use hostwatch_core::types::DbId;
use hostwatch_db::repositories::NotificationRepo;
use hostwatch_db::DbPool;

use crate::delivery::{DispatchError, Transport};

/// Outcome of one dispatch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub sent: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct Dispatcher {
    pool: DbPool,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(pool: DbPool, transport: Arc<dyn Transport>) -> Self {
        Self { pool, transport }
    }

    /// Send all queued notifications once.
    ///
    /// Each notification is claimed in its own transaction and deleted in
    /// that transaction after a successful send, so overlapping runs (the
    /// scheduler, the API trigger and the worker) never deliver it twice.
    /// Only database errors abort the run; individual delivery failures are
    /// logged and counted.
    pub async fn dispatch(&self) -> Result<DispatchReport, sqlx::Error> {
        let mut report = DispatchReport::default();
        let mut attempted: Vec<DbId> = Vec::new();

        loop {
            let mut tx = self.pool.begin().await?;
            let Some(item) = NotificationRepo::claim_next(&mut *tx, &attempted).await? else {
                break;
            };
            let notification = &item.notification;
            attempted.push(notification.id);

            let result = if item.email.trim().is_empty() {
                Err(DispatchError::MissingAddress)
            } else {
                self.transport
                    .send(&item.email, &notification.title, &notification.content)
                    .await
            };

            match result {
                Ok(()) => {
                    NotificationRepo::delete(&mut *tx, notification.id).await?;
                    tx.commit().await?;
                    report.sent += 1;
                }
                Err(e) => {
                    tx.rollback().await?;
                    tracing::warn!(
                        error = %e,
                        notification_id = notification.id,
                        user = %item.username,
                        "Notification delivery failed"
                    );
                    report.failed += 1;
                }
            }
        }

        if !attempted.is_empty() {
            tracing::info!(sent = report.sent, failed = report.failed, "Dispatched notifications");
        }
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// DispatchScheduler
// ---------------------------------------------------------------------------

/// Background service that dispatches notifications on a fixed interval.
pub struct DispatchScheduler {
    dispatcher: Dispatcher,
    interval: Duration,
}

/// Shortest period the scheduler runs at.
const MIN_INTERVAL: Duration = Duration::from_secs(1);

impl DispatchScheduler {
    /// Intervals shorter than one second are raised to one second.
    pub fn new(dispatcher: Dispatcher, interval: Duration) -> Self {
        Self {
            dispatcher,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Run the dispatch loop until `cancel` fires. The first run is immediate.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Dispatch scheduler cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.dispatcher.dispatch().await {
                        tracing::error!(error = %e, "Failed to dispatch notifications");
                    }
                }
            }
        }
    }
}
