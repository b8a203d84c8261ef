//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for short links.
///
/// `short_links.alias` is the primary key, so uniqueness holds even when two
/// requests pass the service-level availability check at the same time.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn find_all(&self) -> Result<Vec<ShortLink>, AppError> {
        let links = sqlx::query_as::<_, ShortLink>(
            "SELECT alias, url FROM short_links ORDER BY alias",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortLink>, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            "SELECT alias, url FROM short_links WHERE alias = $1",
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let inserted = sqlx::query_as::<_, ShortLink>(
            r#"
            INSERT INTO short_links (alias, url)
            VALUES ($1, $2)
            ON CONFLICT (alias) DO NOTHING
            RETURNING alias, url
            "#,
        )
        .bind(&new_link.alias)
        .bind(&new_link.url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        inserted.ok_or_else(|| {
            AppError::conflict(
                "Alias already exists",
                json!({ "alias": new_link.alias }),
            )
        })
    }

    async fn delete_by_alias(&self, alias: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_links WHERE alias = $1")
            .bind(alias)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
