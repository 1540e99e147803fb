//! Route definitions for the `/users` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /register                  -> register (public)
/// GET    /me                        -> get_me
/// PUT    /me                        -> update_me
/// PUT    /me/profile                -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/me", get(users::get_me).put(users::update_me))
        .route("/me/profile", put(users::update_profile))
}
