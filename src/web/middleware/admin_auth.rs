//! HTTP Basic authentication middleware for the admin page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_auth::AuthBasic;

use crate::error::BASIC_CHALLENGE;
use crate::state::AppState;

/// Body of the `401` challenge response.
#[derive(Template, WebTemplate)]
#[template(path = "not_authorized.html")]
struct NotAuthorizedTemplate {}

/// Authenticates admin requests using HTTP Basic credentials.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(username:password)
/// ```
///
/// Credentials are compared against the pair held by
/// [`crate::application::services::AuthService`].
///
/// # Errors
///
/// Responds `401 Unauthorized` with `WWW-Authenticate: Basic` and a
/// "Not Authorized" page if the header is missing, malformed or wrong.
/// The wrapped handler is not invoked.
///
/// # Example
///
/// ```rust,ignore
/// let admin = Router::new()
///     .route("/new", get(admin_page_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let Ok(AuthBasic((username, password))) = AuthBasic::from_request_parts(&mut parts, &()).await
    else {
        tracing::debug!("Admin request without usable Basic credentials");
        return challenge();
    };

    if let Err(e) = st.auth_service.authenticate(&username, password.as_deref()) {
        tracing::warn!(username = %username, error = %e, "Admin authentication failed");
        return challenge();
    }

    let req = Request::from_parts(parts, body);
    next.run(req).await
}

fn challenge() -> Response {
    let mut response = (StatusCode::UNAUTHORIZED, NotAuthorizedTemplate {}).into_response();
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE));
    response
}
