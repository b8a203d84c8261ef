//! Form payloads and the shared link creation flow.

use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

/// Fields posted by the admin and public forms.
///
/// Every field is optional at the wire level; presence rules are enforced
/// by [`crate::application::services::ShortLinkService`].
#[derive(Debug, Default, Deserialize)]
pub struct LinkForm {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl LinkForm {
    pub fn is_delete(&self) -> bool {
        self.intent.as_deref() == Some("delete")
    }
}

/// A link created by the last submission.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub alias: String,
    pub url: String,
    pub short_url: String,
}

/// Result of a form submission, rendered next to the form.
#[derive(Debug, Default)]
pub struct FormOutcome {
    pub created: Option<CreatedLink>,
    pub url_error: Option<String>,
    pub alias_error: Option<String>,
}

impl FormOutcome {
    fn from_details(details: &Value) -> Self {
        let field = |name: &str| details.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            created: None,
            url_error: field("url"),
            alias_error: field("alias"),
        }
    }
}

/// Creates a link from a submitted form.
///
/// Validation failures and lost races are turned into field errors;
/// anything else propagates as an [`AppError`].
pub async fn submit_link(
    state: &AppState,
    form: &LinkForm,
) -> Result<(StatusCode, FormOutcome), AppError> {
    let url = form.url.as_deref().unwrap_or_default();

    match state
        .link_service
        .create_link(url, form.alias.as_deref())
        .await
    {
        Ok(link) => {
            let short_url = state.short_url(&link.alias);
            Ok((
                StatusCode::OK,
                FormOutcome {
                    created: Some(CreatedLink {
                        alias: link.alias,
                        url: link.url,
                        short_url,
                    }),
                    ..FormOutcome::default()
                },
            ))
        }
        Err(AppError::Validation { details, .. }) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            FormOutcome::from_details(&details),
        )),
        Err(AppError::Conflict { message, .. }) => Ok((
            StatusCode::CONFLICT,
            FormOutcome {
                alias_error: Some(message),
                ..FormOutcome::default()
            },
        )),
        Err(e) => Err(e),
    }
}
