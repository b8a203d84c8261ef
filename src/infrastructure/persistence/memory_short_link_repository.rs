//! In-process implementation of the short link repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

/// A repository that keeps links in memory.
///
/// Used when no database is configured and by HTTP tests. Data is lost on
/// restart. The availability check and the write in [`insert`] happen under
/// one write lock, which gives the same uniqueness guarantee as the
/// PostgreSQL primary key.
///
/// [`insert`]: ShortLinkRepository::insert
#[derive(Default)]
pub struct MemoryShortLinkRepository {
    links: RwLock<BTreeMap<String, String>>,
}

impl MemoryShortLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("Using in-memory short link store");
        Self::default()
    }
}

#[async_trait]
impl ShortLinkRepository for MemoryShortLinkRepository {
    async fn find_all(&self) -> Result<Vec<ShortLink>, AppError> {
        let links = self.links.read().await;

        Ok(links
            .iter()
            .map(|(alias, url)| ShortLink::new(alias.clone(), url.clone()))
            .collect())
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortLink>, AppError> {
        let links = self.links.read().await;

        Ok(links
            .get(alias)
            .map(|url| ShortLink::new(alias, url.clone())))
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.write().await;

        if links.contains_key(&new_link.alias) {
            return Err(AppError::conflict(
                "Alias already exists",
                json!({ "alias": new_link.alias }),
            ));
        }

        links.insert(new_link.alias.clone(), new_link.url.clone());
        Ok(new_link.into())
    }

    async fn delete_by_alias(&self, alias: &str) -> Result<bool, AppError> {
        Ok(self.links.write().await.remove(alias).is_some())
    }
}
