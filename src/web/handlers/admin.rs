//! Admin page: list, create and delete links.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::web::forms::{FormOutcome, LinkForm, submit_link};

/// One row of the link table.
pub struct LinkRow {
    pub alias: String,
    pub url: String,
    pub short_url: String,
}

/// Template for the admin page.
///
/// Renders `templates/admin.html` with:
/// - Link creation form and the outcome of the last submission
/// - Every stored link with a delete button
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub action: &'static str,
    pub outcome: FormOutcome,
    pub links: Vec<LinkRow>,
}

/// Renders the admin page.
///
/// # Endpoint
///
/// `GET /new` (HTTP Basic auth, see [`crate::web::middleware::admin_auth`])
pub async fn admin_page_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    render(&state, StatusCode::OK, FormOutcome::default()).await
}

/// Handles admin form posts.
///
/// # Endpoint
///
/// `POST /new` (HTTP Basic auth)
///
/// # Form Fields
///
/// - `intent=delete` with `alias` - deletes the link; unknown aliases are ignored
/// - `url`, optional `alias` - creates a link
///
/// # Response Codes
///
/// - **200 OK**: action applied
/// - **422 Unprocessable Entity**: validation failed, errors shown by the fields
/// - **409 Conflict**: the alias was claimed concurrently
/// - **503 Service Unavailable**: no free alias could be generated
pub async fn admin_action_handler(
    State(state): State<AppState>,
    Form(form): Form<LinkForm>,
) -> Result<Response, AppError> {
    if form.is_delete() {
        let alias = form.alias.as_deref().unwrap_or_default();
        state.link_service.delete_link(alias).await?;
        return render(&state, StatusCode::OK, FormOutcome::default()).await;
    }

    let (status, outcome) = submit_link(&state, &form).await?;
    render(&state, status, outcome).await
}

async fn render(
    state: &AppState,
    status: StatusCode,
    outcome: FormOutcome,
) -> Result<Response, AppError> {
    let links = state
        .link_service
        .list_links()
        .await?
        .into_iter()
        .map(|link| LinkRow {
            short_url: state.short_url(&link.alias),
            alias: link.alias,
            url: link.url,
        })
        .collect();

    let page = AdminTemplate {
        action: "/new",
        outcome,
        links,
    };

    Ok((status, page).into_response())
}
