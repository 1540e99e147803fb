//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /                          -> list_notifications
/// DELETE /{id}                      -> delete_notification
/// POST   /dispatch                  -> dispatch_notifications
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/dispatch", post(notifications::dispatch_notifications))
        .route("/{id}", delete(notifications::delete_notification))
}
