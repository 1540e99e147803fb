//! Handlers for the `/events` resource.
//!
//! `POST /events/report` is the intake used by monitoring agents; the rest
//! lets the owner browse, inspect, check off and comment on events.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use hostwatch_core::error::CoreError;
use hostwatch_core::event_fields::{get_field, require_field};
use hostwatch_core::render::{short_message_from, SHORT_MESSAGE_MAX_LEN};
use hostwatch_core::search::{clamp_limit, clamp_offset};
use hostwatch_core::timezone::{localize_timestamp, parse_host_timestamp};
use hostwatch_core::types::DbId;
use hostwatch_db::models::event::{
    CreateEventComment, EventComment, EventDetail, EventFilter, EventWithContext, NewEvent,
};
use hostwatch_db::models::host::{CreateHost, Host, DEFAULT_HOST_TIMEZONE};
use hostwatch_db::repositories::{EventCommentRepo, EventRepo, EventTypeRepo, HostRepo};
use hostwatch_db::DbPool;
use hostwatch_events::ReportedEvent;

use crate::error::{AppError, AppResult};
use crate::extract::FormOrJson;
use crate::handlers::hosts::MAX_ADDRESS_LEN;
use crate::middleware::auth::AuthUser;
use crate::query::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of an event type name.
const MAX_TYPE_LEN: usize = 50;
/// Maximum length of the protocol field.
const MAX_PROTOCOL_LEN: usize = 30;
/// Maximum length of the monitoring module name.
const MAX_FIELDS_CLASS_LEN: usize = 50;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /events/report`.
#[derive(Debug, Deserialize)]
pub struct ReportEvent {
    pub message: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub timestamp: String,
    #[serde(default)]
    pub source_host_ipv4: String,
    #[serde(default)]
    pub source_host_ipv6: String,
    #[serde(default)]
    pub monitoring_module: String,
    #[serde(default)]
    pub monitoring_module_fields: String,
    #[serde(default)]
    pub short_message: Option<String>,
    #[serde(default)]
    pub protocol: String,
}

/// Query parameters for event listings.
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    pub event_type: Option<DbId>,
    /// Only unchecked events when `true`.
    #[serde(default)]
    pub pending: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for a single field lookup.
#[derive(Debug, Default, Deserialize)]
pub struct FieldParams {
    /// Answer 404 for an absent field instead of `null`.
    #[serde(default)]
    pub strict: bool,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Event", id })
}

fn too_long(field: &str, max: usize) -> CoreError {
    CoreError::Validation(format!(
        "{field}: Ensure this value has at most {max} characters."
    ))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Load an event of the caller or fail with 404.
async fn owned_event(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<EventWithContext> {
    EventRepo::find_for_user(pool, id, user_id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Find the caller's host by either address, registering a new host on the
/// first report from an unknown address.
async fn resolve_source_host(
    pool: &DbPool,
    user_id: DbId,
    ipv4: &str,
    ipv6: &str,
) -> AppResult<Host> {
    if let Some(host) = HostRepo::find_by_address(pool, user_id, ipv4, ipv6).await? {
        return Ok(host);
    }

    let name = if ipv4.is_empty() { ipv6 } else { ipv4 };
    let host = HostRepo::create(
        pool,
        user_id,
        &CreateHost {
            name: name.to_string(),
            description: None,
            ipv4: Some(ipv4.to_string()),
            ipv6: Some(ipv6.to_string()),
            timezone: Some(DEFAULT_HOST_TIMEZONE.to_string()),
        },
    )
    .await?;
    tracing::info!(host_id = host.id, user_id, name, "Registered host from event report");
    Ok(host)
}

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

/// POST /api/v1/events/report
///
/// Accepts a form or JSON body and answers `{"status": "ok", "event_id": id}`.
pub async fn report_event(
    auth: AuthUser,
    State(state): State<AppState>,
    FormOrJson(input): FormOrJson<ReportEvent>,
) -> AppResult<Json<Value>> {
    let message = input.message.trim_end().to_string();
    if message.trim().is_empty() {
        return Err(CoreError::Validation("message: This field is required.".into()).into());
    }
    let type_name = non_empty(&input.event_type)
        .ok_or_else(|| CoreError::Validation("type: This field is required.".into()))?;
    if type_name.chars().count() > MAX_TYPE_LEN {
        return Err(too_long("type", MAX_TYPE_LEN).into());
    }
    if input.protocol.chars().count() > MAX_PROTOCOL_LEN {
        return Err(too_long("protocol", MAX_PROTOCOL_LEN).into());
    }
    let fields_class = non_empty(&input.monitoring_module);
    if fields_class
        .as_deref()
        .is_some_and(|c| c.chars().count() > MAX_FIELDS_CLASS_LEN)
    {
        return Err(too_long("monitoring_module", MAX_FIELDS_CLASS_LEN).into());
    }
    let timestamp = parse_host_timestamp(&input.timestamp)?;

    let ipv4 = input.source_host_ipv4.trim();
    let ipv6 = input.source_host_ipv6.trim();
    if ipv4.is_empty() && ipv6.is_empty() {
        return Err(CoreError::Validation(
            "source_host_ipv4 or source_host_ipv6 is required.".into(),
        )
        .into());
    }
    for (field, value) in [("source_host_ipv4", ipv4), ("source_host_ipv6", ipv6)] {
        if value.chars().count() > MAX_ADDRESS_LEN {
            return Err(too_long(field, MAX_ADDRESS_LEN).into());
        }
    }

    let short_message = input
        .short_message
        .as_deref()
        .and_then(non_empty)
        .map(|s| s.chars().take(SHORT_MESSAGE_MAX_LEN).collect())
        .unwrap_or_else(|| short_message_from(&message));

    let host = resolve_source_host(&state.pool, auth.user_id, ipv4, ipv6).await?;
    let event_type = EventTypeRepo::get_or_create(&state.pool, auth.user_id, &type_name).await?;

    let event = EventRepo::create(
        &state.pool,
        &NewEvent {
            message,
            short_message,
            timestamp,
            protocol: input.protocol.trim().to_string(),
            event_type_id: event_type.id,
            source_host_id: host.id,
            fields_class,
            fields_data: non_empty(&input.monitoring_module_fields),
        },
    )
    .await?;

    tracing::info!(
        event_id = event.id,
        event_type = %event_type.name,
        host_id = host.id,
        "Event reported"
    );

    state.event_bus.publish(ReportedEvent {
        event_id: event.id,
        event_type_id: event_type.id,
        owner_id: host.user_id,
        notify: event_type.notify,
        alert_level: event_type.level(),
        timestamp: event.timestamp,
    });

    Ok(Json(serde_json::json!({
        "status": "ok",
        "event_id": event.id,
    })))
}

// ---------------------------------------------------------------------------
// Browsing
// ---------------------------------------------------------------------------

/// GET /api/v1/events/list
///
/// Returns `{"events": [{"id", "short_description"}]}`, newest first.
pub async fn list_events(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<Json<Value>> {
    let filter = EventFilter {
        event_type_id: params.event_type,
        pending_only: params.pending,
        limit: clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT),
        offset: clamp_offset(params.offset),
    };
    let events = EventRepo::list_for_user(&state.pool, auth.user_id, &filter).await?;
    Ok(Json(serde_json::json!({ "events": events })))
}

/// GET /api/v1/events/{id}
///
/// `local_timestamp` is the event time in the owner's timezone, or `null`
/// when the host's timezone is not recognised.
pub async fn get_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EventDetail>> {
    let row = owned_event(&state.pool, id, auth.user_id).await?;

    let local_timestamp = match localize_timestamp(
        row.event.timestamp,
        &row.host_timezone,
        Some(&row.owner_timezone),
    ) {
        Ok(local) => Some(local.to_rfc3339()),
        Err(e) => {
            tracing::warn!(event_id = id, error = %e, "Cannot localize event timestamp");
            None
        }
    };

    Ok(Json(EventDetail::new(row, local_timestamp)))
}

/// DELETE /api/v1/events/{id}
pub async fn delete_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !EventRepo::delete(&state.pool, id, auth.user_id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/events/{id}/fields
///
/// The decoded monitoring-module fields; 400 when they cannot be decoded.
pub async fn get_fields(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let row = owned_event(&state.pool, id, auth.user_id).await?;
    Ok(Json(Value::Object(row.event.details()?)))
}

/// GET /api/v1/events/{id}/fields/{name}
///
/// Returns `{"name", "value"}`; `value` is `null` for an absent field unless
/// `?strict=true`.
pub async fn get_field_value(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, name)): Path<(DbId, String)>,
    Query(params): Query<FieldParams>,
) -> AppResult<Json<Value>> {
    let row = owned_event(&state.pool, id, auth.user_id).await?;
    let fields_data = row.event.fields_data.as_deref();

    let value = if params.strict {
        require_field(fields_data, &name)?
    } else {
        get_field(fields_data, &name, Value::Null)
    };

    Ok(Json(serde_json::json!({ "name": name, "value": value })))
}

/// POST /api/v1/events/{id}/check
pub async fn check_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    set_checked(&state.pool, id, auth.user_id, true).await
}

/// POST /api/v1/events/{id}/uncheck
pub async fn uncheck_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    set_checked(&state.pool, id, auth.user_id, false).await
}

async fn set_checked(pool: &DbPool, id: DbId, user_id: DbId, checked: bool) -> AppResult<StatusCode> {
    if !EventRepo::set_checked(pool, id, user_id, checked).await? {
        return Err(not_found(id));
    }
    tracing::debug!(event_id = id, checked, "Event check state changed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{id}/comments
pub async fn list_comments(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<EventComment>>>> {
    let row = owned_event(&state.pool, id, auth.user_id).await?;
    let comments = EventCommentRepo::list_for_event(&state.pool, row.event.id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/events/{id}/comments
pub async fn add_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    FormOrJson(input): FormOrJson<CreateEventComment>,
) -> AppResult<(StatusCode, Json<DataResponse<EventComment>>)> {
    if input.comment.trim().is_empty() {
        return Err(CoreError::Validation("comment: This field is required.".into()).into());
    }
    let row = owned_event(&state.pool, id, auth.user_id).await?;
    let comment =
        EventCommentRepo::create(&state.pool, row.event.id, &auth.username, &input.comment)
            .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
