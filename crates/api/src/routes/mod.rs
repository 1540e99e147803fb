pub mod event_types;
pub mod events;
pub mod health;
pub mod hosts;
pub mod networks;
pub mod notifications;
pub mod plugins;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                          liveness and database check
///
/// /users/register                                  register (public)
/// /users/me                                        get, update
/// /users/me/profile                                update profile settings
///
/// /hosts                                           create
/// /hosts/list                                      list
/// /hosts/{id}                                      get, update, delete
///
/// /networks                                        create
/// /networks/list                                   list
/// /networks/{id}                                   get, update, delete
/// /networks/{id}/hosts/{host_id}                   add, remove member
///
/// /events/report                                   report (agents)
/// /events/list                                     list
/// /events/{id}                                     get, delete
/// /events/{id}/fields                              decoded module fields
/// /events/{id}/fields/{name}                       single field
/// /events/{id}/check                               mark checked
/// /events/{id}/uncheck                             mark unchecked
/// /events/{id}/comments                            list, create
///
/// /event-types                                     list
/// /event-types/{id}                                get, update, delete
/// /event-types/{id}/events                         events of type
/// /event-types/{id}/pending                        unchecked events of type
///
/// /event-type-categories                           list, create
/// /event-type-categories/{id}                      update, delete
///
/// /notifications                                   list
/// /notifications/{id}                              delete
/// /notifications/dispatch                          send queued notifications
///
/// /search                                          hosts and networks
///
/// /plugins                                         list
/// /plugins/{name}                                  activate, deactivate
///
/// /dashboard/widgets                               list, add
/// /dashboard/widgets/choices                       placeable widgets
/// /dashboard/widgets/{id}                          remove
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        // Accounts and profile settings.
        .nest("/users", users::router())
        // Monitored inventory.
        .nest("/hosts", hosts::router())
        .nest("/networks", networks::router())
        // Event intake and browsing.
        .nest("/events", events::router())
        .nest("/event-types", event_types::router())
        .nest("/event-type-categories", event_types::category_router())
        // Notification queue.
        .nest("/notifications", notifications::router())
        .nest("/search", plugins::search_router())
        // Plugins and per-user dashboard.
        .nest("/plugins", plugins::router())
        .nest("/dashboard", plugins::dashboard_router())
}
