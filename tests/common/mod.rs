#![allow(dead_code)]

use axum_test::TestServer;
use base64::Engine as _;
use go_links::application::services::{AdminCredentials, AuthService, ShortLinkService};
use go_links::domain::entities::NewShortLink;
use go_links::domain::repositories::ShortLinkRepository;
use go_links::infrastructure::persistence::MemoryShortLinkRepository;
use go_links::routes::app_router;
use go_links::state::AppState;
use std::sync::Arc;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";
pub const HOME_URL: &str = "https://gdscutsa.com";
pub const PUBLIC_BASE_URL: &str = "https://go.example.test";

pub fn create_test_state() -> (AppState, Arc<MemoryShortLinkRepository>) {
    let repo = Arc::new(MemoryShortLinkRepository::new());
    let dyn_repo: Arc<dyn ShortLinkRepository> = repo.clone();

    let state = AppState::new(
        Arc::new(ShortLinkService::new(dyn_repo, 100)),
        Arc::new(AuthService::new(AdminCredentials::new(
            ADMIN_USERNAME,
            ADMIN_PASSWORD,
        ))),
        HOME_URL.to_string(),
        PUBLIC_BASE_URL.to_string(),
    );

    (state, repo)
}

pub fn create_test_server() -> (TestServer, Arc<MemoryShortLinkRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();
    (server, repo)
}

pub async fn create_test_link(repo: &MemoryShortLinkRepository, alias: &str, url: &str) {
    repo.insert(NewShortLink {
        alias: alias.to_string(),
        url: url.to_string(),
    })
    .await
    .unwrap();
}

pub fn basic_auth(username: &str, password: &str) -> String {
    let encoded =
        base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

pub fn admin_auth() -> String {
    basic_auth(ADMIN_USERNAME, ADMIN_PASSWORD)
}
