//! Admin authentication against a single shared credential pair.

use serde_json::json;

use crate::error::AppError;

/// Username and password granting access to the admin page.
///
/// Loaded once from configuration and injected into [`AuthService`].
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Service for authenticating admin requests decoded from HTTP Basic auth.
pub struct AuthService {
    credentials: AdminCredentials,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(credentials: AdminCredentials) -> Self {
        Self { credentials }
    }

    /// Checks decoded Basic auth values against the configured pair.
    ///
    /// A missing password never matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if either value differs.
    pub fn authenticate(&self, username: &str, password: Option<&str>) -> Result<(), AppError> {
        let username_ok = username == self.credentials.username;
        let password_ok = password == Some(self.credentials.password.as_str());

        if username_ok && password_ok {
            Ok(())
        } else {
            Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid credentials" }),
            ))
        }
    }
}
