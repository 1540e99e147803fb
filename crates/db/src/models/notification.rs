//! Notification entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use hostwatch_core::error::CoreError;
use hostwatch_core::related::RelatedRef;
use hostwatch_core::types::{DbId, Timestamp};

/// A queued notification from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub user_id: DbId,
    pub related_type: Option<String>,
    pub related_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl Notification {
    /// The object this notification points at, if any.
    pub fn related(&self) -> Result<Option<RelatedRef>, CoreError> {
        RelatedRef::from_columns(self.related_type.as_deref(), self.related_id)
    }
}

/// DTO for queueing a notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub content: String,
    pub user_id: DbId,
    pub related: Option<RelatedRef>,
}

/// A queued notification joined with its recipient's address.
#[derive(Debug, Clone, FromRow)]
pub struct PendingDelivery {
    #[sqlx(flatten)]
    pub notification: Notification,
    pub username: String,
    /// Empty when the user has no address on file.
    pub email: String,
}
