//! Route definitions for event types and their categories.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{categories, event_types};
use crate::state::AppState;

/// Routes mounted at `/event-types`.
///
/// ```text
/// GET    /                          -> list_event_types
/// GET    /{id}                      -> get_event_type
/// PUT    /{id}                      -> update_event_type
/// DELETE /{id}                      -> delete_event_type
/// GET    /{id}/events               -> list_type_events
/// GET    /{id}/pending              -> list_pending_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event_types::list_event_types))
        .route(
            "/{id}",
            get(event_types::get_event_type)
                .put(event_types::update_event_type)
                .delete(event_types::delete_event_type),
        )
        .route("/{id}/events", get(event_types::list_type_events))
        .route("/{id}/pending", get(event_types::list_pending_events))
}

/// Routes mounted at `/event-type-categories`.
///
/// ```text
/// GET    /                          -> list_categories
/// POST   /                          -> create_category
/// PUT    /{id}                      -> update_category
/// DELETE /{id}                      -> delete_category
/// ```
pub fn category_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
}
