//! Route definitions for the `/networks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::networks;
use crate::state::AppState;

/// Routes mounted at `/networks`.
///
/// ```text
/// GET    /list                      -> list_networks
/// POST   /                          -> create_network
/// GET    /{id}                      -> get_network
/// PUT    /{id}                      -> update_network
/// DELETE /{id}                      -> delete_network
/// POST   /{id}/hosts/{host_id}      -> add_host
/// DELETE /{id}/hosts/{host_id}      -> remove_host
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(networks::create_network))
        .route("/list", get(networks::list_networks))
        .route(
            "/{id}",
            get(networks::get_network)
                .put(networks::update_network)
                .delete(networks::delete_network),
        )
        .route(
            "/{id}/hosts/{host_id}",
            post(networks::add_host).delete(networks::remove_host),
        )
}
