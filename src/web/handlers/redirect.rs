//! Handlers for alias redirects and the site root.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its destination URL.
///
/// # Endpoint
///
/// `GET /{*alias}`
///
/// The full path is the alias, so `/team/docs` looks up `team/docs`.
///
/// # Errors
///
/// Returns 404 Not Found if no link has this alias, including paths that
/// do not decode to UTF-8 and so cannot name any alias.
pub async fn redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
    alias: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(alias) = alias.map_err(|e| {
        tracing::debug!(path = %uri.path(), error = %e, "Undecodable alias path");
        AppError::not_found("Short link not found", json!({ "alias": uri.path() }))
    })?;

    let link = state.link_service.resolve(&alias).await?;

    Ok(moved_permanently(&link.url))
}

/// Redirects the site root to the configured home page.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler(State(state): State<AppState>) -> Response {
    moved_permanently(&state.home_url)
}

/// `301 Moved Permanently` to `url`.
///
/// Not `Redirect::permanent`, which answers 308.
fn moved_permanently(url: &str) -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response()
}
