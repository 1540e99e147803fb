//! Event, event type, category and comment models and DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use hostwatch_core::alert::AlertLevel;
use hostwatch_core::error::CoreError;
use hostwatch_core::event_fields;
use hostwatch_core::render;
use hostwatch_core::types::{DbId, HostTime, Timestamp};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// A row from the `event_type_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventTypeCategory {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventTypeCategory {
    pub name: String,
    pub parent_id: Option<DbId>,
}

/// Absent fields are left unchanged; `clear_parent` detaches the category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventTypeCategory {
    pub name: Option<String>,
    pub parent_id: Option<DbId>,
    #[serde(default)]
    pub clear_parent: bool,
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A row from the `event_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventType {
    pub id: DbId,
    pub name: String,
    pub name_slug: String,
    pub user_id: DbId,
    pub alert_level: i16,
    pub notify: bool,
    pub category_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl EventType {
    /// Stored level; out-of-range values read as [`AlertLevel::None`].
    pub fn level(&self) -> AlertLevel {
        AlertLevel::try_from(self.alert_level).unwrap_or_default()
    }
}

/// Absent fields are left unchanged; `clear_category` detaches the type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventType {
    pub alert_level: Option<AlertLevel>,
    pub notify: Option<bool>,
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub clear_category: bool,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A row from the `events` table.
///
/// `timestamp` is wall-clock time on the source host, without an offset.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub message: String,
    pub short_message: String,
    pub message_slug: String,
    pub timestamp: HostTime,
    pub protocol: String,
    pub event_type_id: DbId,
    pub source_host_id: DbId,
    pub fields_class: Option<String>,
    pub fields_data: Option<String>,
    pub checked: bool,
    pub created_at: Timestamp,
}

impl Event {
    /// Decoded `fields_data` object.
    pub fn details(&self) -> Result<Map<String, Value>, CoreError> {
        event_fields::decode_details(self.fields_data.as_deref())
    }

    /// Message with newlines turned into `<br />`.
    pub fn html_message(&self) -> String {
        render::html_message(&self.message)
    }

    /// `"'<message>' at <timestamp>"`.
    pub fn summary(&self) -> String {
        render::event_summary(&self.message, self.timestamp)
    }
}

/// An event joined with the names and timezones needed to render it.
#[derive(Debug, Clone, FromRow)]
pub struct EventWithContext {
    #[sqlx(flatten)]
    pub event: Event,
    pub event_type_name: String,
    pub owner_id: DbId,
    pub host_timezone: String,
    /// Profile timezone of the owner; empty when unset.
    pub owner_timezone: String,
}

/// Event as returned by `GET /events/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    pub event_id: DbId,
    pub description: String,
    pub short_description: String,
    pub event_type: String,
    pub timestamp: String,
    pub local_timestamp: Option<String>,
    pub protocol: String,
    pub source_host_id: DbId,
    pub fields_class: Option<String>,
    pub fields_data: Option<String>,
    pub checked: bool,
}

impl EventDetail {
    pub fn new(row: EventWithContext, local_timestamp: Option<String>) -> Self {
        let event = row.event;
        Self {
            event_id: event.id,
            description: event.message,
            short_description: event.short_message,
            event_type: row.event_type_name,
            timestamp: event.timestamp.to_string(),
            local_timestamp,
            protocol: event.protocol,
            source_host_id: event.source_host_id,
            fields_class: event.fields_class,
            fields_data: event.fields_data,
            checked: event.checked,
        }
    }
}

/// Entry of `GET /events/list`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventListItem {
    pub id: DbId,
    pub short_description: String,
}

/// DTO for inserting a reported event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub message: String,
    pub short_message: String,
    pub timestamp: HostTime,
    pub protocol: String,
    pub event_type_id: DbId,
    pub source_host_id: DbId,
    pub fields_class: Option<String>,
    pub fields_data: Option<String>,
}

/// Filters for listing a user's events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub event_type_id: Option<DbId>,
    /// Keep unchecked events only.
    pub pending_only: bool,
    pub limit: i64,
    pub offset: i64,
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// A row from the `event_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventComment {
    pub id: DbId,
    pub comment: String,
    pub user_name: String,
    pub timestamp: Timestamp,
    pub event_id: DbId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventComment {
    pub comment: String,
}
