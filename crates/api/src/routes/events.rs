//! Route definitions for the `/events` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// POST   /report                    -> report_event
/// GET    /list                      -> list_events
/// GET    /{id}                      -> get_event
/// DELETE /{id}                      -> delete_event
/// GET    /{id}/fields               -> get_fields
/// GET    /{id}/fields/{name}        -> get_field_value
/// POST   /{id}/check                -> check_event
/// POST   /{id}/uncheck              -> uncheck_event
/// GET    /{id}/comments             -> list_comments
/// POST   /{id}/comments             -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/report", post(events::report_event))
        .route("/list", get(events::list_events))
        .route("/{id}", get(events::get_event).delete(events::delete_event))
        .route("/{id}/fields", get(events::get_fields))
        .route("/{id}/fields/{name}", get(events::get_field_value))
        .route("/{id}/check", post(events::check_event))
        .route("/{id}/uncheck", post(events::uncheck_event))
        .route(
            "/{id}/comments",
            get(events::list_comments).post(events::add_comment),
        )
}
