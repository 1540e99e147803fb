//! Route definitions for plugins, the dashboard and search.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{dashboard, plugins, search};
use crate::state::AppState;

/// Routes mounted at `/plugins`.
///
/// ```text
/// GET    /                          -> list_plugins
/// PUT    /{name}                    -> update_plugin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plugins::list_plugins))
        .route("/{name}", put(plugins::update_plugin))
}

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET    /widgets                   -> list_widgets
/// POST   /widgets                   -> add_widget
/// GET    /widgets/choices           -> widget_choices
/// DELETE /widgets/{id}              -> remove_widget
/// ```
pub fn dashboard_router() -> Router<AppState> {
    Router::new()
        .route(
            "/widgets",
            get(dashboard::list_widgets).post(dashboard::add_widget),
        )
        .route("/widgets/choices", get(dashboard::widget_choices))
        .route("/widgets/{id}", delete(dashboard::remove_widget))
}

/// Routes mounted at `/search`.
pub fn search_router() -> Router<AppState> {
    Router::new().route("/", get(search::search))
}
