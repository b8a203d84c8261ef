//! Public link submission form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::web::forms::{FormOutcome, LinkForm, submit_link};

/// Template for the public submission page (form only, no listing).
#[derive(Template, WebTemplate)]
#[template(path = "submit.html")]
pub struct SubmitTemplate {
    pub action: &'static str,
    pub outcome: FormOutcome,
}

/// Creates a link from the public form.
///
/// # Endpoint
///
/// `POST /`
///
/// Same creation rules as the admin page; `intent` is ignored.
pub async fn submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LinkForm>,
) -> Result<Response, AppError> {
    let (status, outcome) = submit_link(&state, &form).await?;

    Ok((
        status,
        SubmitTemplate {
            action: "/",
            outcome,
        },
    )
        .into_response())
}
