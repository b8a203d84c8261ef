//! Route groups.

use crate::state::AppState;
use crate::web::handlers::{
    admin_action_handler, admin_page_handler, home_handler, redirect_handler, submit_handler,
};
use axum::{Router, routing::get};

/// Admin routes requiring HTTP Basic authentication.
///
/// Protected via [`crate::web::middleware::admin_auth`].
///
/// # Endpoints
///
/// - `GET  /new` - Admin page listing every link
/// - `POST /new` - Create or delete a link
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/new", get(admin_page_handler).post(admin_action_handler))
}

/// Public routes.
///
/// # Endpoints
///
/// - `GET  /`         - Redirect to the home page
/// - `POST /`         - Public link submission
/// - `GET  /{*alias}` - Short link redirect
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler).post(submit_handler))
        .route("/{*alias}", get(redirect_handler))
}
