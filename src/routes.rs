//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`         - 301 to the home page (public)
//! - `POST /`         - Public link submission form
//! - `GET  /new`      - Admin page (HTTP Basic auth)
//! - `POST /new`      - Admin create/delete (HTTP Basic auth)
//! - `GET  /{*alias}` - Short link redirect (public)
//!
//! `/new` is matched before the alias catch-all, which is why `new` can never
//! be used as an alias.
//!
//! Paths are not normalized: `/demo/` and `/demo` are different aliases.

use crate::state::AppState;
use crate::web;
use crate::web::middleware::{admin_auth, tracing};
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let admin_router = web::routes::admin_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        admin_auth::layer,
    ));

    Router::new()
        .merge(admin_router)
        .merge(web::routes::public_routes())
        .with_state(state)
        .layer(tracing::layer())
}
