//! Route definitions for the `/hosts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::hosts;
use crate::state::AppState;

/// Routes mounted at `/hosts`.
///
/// ```text
/// GET    /list                      -> list_hosts
/// POST   /                          -> create_host
/// GET    /{id}                      -> get_host
/// PUT    /{id}                      -> update_host
/// DELETE /{id}                      -> delete_host
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(hosts::create_host))
        .route("/list", get(hosts::list_hosts))
        .route(
            "/{id}",
            get(hosts::get_host)
                .put(hosts::update_host)
                .delete(hosts::delete_host),
        )
}
