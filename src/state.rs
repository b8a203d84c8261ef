//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, ShortLinkService};
use crate::config::Config;
use crate::domain::repositories::ShortLinkRepository;

/// Link service over whichever store the server was started with.
pub type DynShortLinkService = ShortLinkService<dyn ShortLinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynShortLinkService>,
    pub auth_service: Arc<AuthService>,
    /// Target of `GET /`.
    pub home_url: String,
    /// Origin shown in front of created aliases.
    pub public_base_url: String,
}

impl AppState {
    pub fn new(
        link_service: Arc<DynShortLinkService>,
        auth_service: Arc<AuthService>,
        home_url: String,
        public_base_url: String,
    ) -> Self {
        Self {
            link_service,
            auth_service,
            home_url,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the state from loaded configuration and a store.
    pub fn from_config(repository: Arc<dyn ShortLinkRepository>, config: &Config) -> Self {
        Self::new(
            Arc::new(ShortLinkService::new(repository, config.max_alias_attempts)),
            Arc::new(AuthService::new(config.admin_credentials())),
            config.home_url.clone(),
            config.public_base_url.clone(),
        )
    }

    /// Public URL of a short link.
    pub fn short_url(&self, alias: &str) -> String {
        format!("{}/{}", self.public_base_url, alias)
    }
}
