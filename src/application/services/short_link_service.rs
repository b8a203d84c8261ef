//! Short link allocation, resolution and deletion.

use std::sync::Arc;

use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::domain::alias::{generate_alias, is_reserved};
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

/// Default cap on alias candidates drawn for one allocation.
pub const DEFAULT_MAX_ALIAS_ATTEMPTS: usize = 100;

pub const URL_REQUIRED: &str = "URL is required";
pub const ALIAS_TAKEN: &str = "Alias already exists";

/// Service for allocating aliases and managing short links.
///
/// Availability checks are advisory: the store's atomic insert is what
/// guarantees a single link per alias. A creator that loses a race on an
/// explicit alias gets [`AppError::Conflict`]; a generated alias that loses a
/// race is replaced by a fresh candidate within the same attempt budget.
pub struct ShortLinkService<R: ShortLinkRepository + ?Sized> {
    repository: Arc<R>,
    max_alias_attempts: usize,
}

impl<R: ShortLinkRepository + ?Sized> ShortLinkService<R> {
    /// Creates a new service.
    ///
    /// `max_alias_attempts` bounds [`Self::generate_alias`] and
    /// [`Self::reserve_generated`]; values below 1 are treated as 1.
    pub fn new(repository: Arc<R>, max_alias_attempts: usize) -> Self {
        Self {
            repository,
            max_alias_attempts: max_alias_attempts.max(1),
        }
    }

    /// Returns every link, ordered by alias.
    pub async fn list_links(&self) -> Result<Vec<ShortLink>, AppError> {
        self.repository.find_all().await
    }

    /// Looks up a link by exact alias.
    pub async fn find_link(&self, alias: &str) -> Result<Option<ShortLink>, AppError> {
        self.repository.find_by_alias(alias).await
    }

    /// Resolves a request path to its link.
    ///
    /// The whole path is the alias; multi-segment paths are not split.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an empty path or an unknown alias.
    pub async fn resolve(&self, path: &str) -> Result<ShortLink, AppError> {
        if path.is_empty() {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "alias": path }),
            ));
        }

        let link = self.repository.find_by_alias(path).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "alias": path }))
        })?;

        debug!(alias = %link.alias, url = %link.url, "Resolved short link");
        Ok(link)
    }

    /// Draws random aliases until one is not present in the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasExhausted`] after `max_alias_attempts`
    /// occupied candidates.
    pub async fn generate_alias(&self) -> Result<String, AppError> {
        let mut remaining = self.max_alias_attempts;
        self.next_free_alias(&mut remaining).await
    }

    /// Stores `url` under a caller-supplied alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the url is empty, the alias is
    /// empty or reserved, or the alias is already taken at call time.
    /// Returns [`AppError::Conflict`] if another creator inserted the same
    /// alias between the check and the insert.
    pub async fn reserve_with_alias(&self, alias: &str, url: &str) -> Result<ShortLink, AppError> {
        self.validate(url, Some(alias)).await?;
        self.insert(alias, url).await
    }

    /// Stores `url` under a freshly generated alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the url is empty.
    /// Returns [`AppError::AliasExhausted`] when every attempt collided.
    pub async fn reserve_generated(&self, url: &str) -> Result<ShortLink, AppError> {
        self.validate(url, None).await?;

        let mut remaining = self.max_alias_attempts;
        loop {
            let candidate = self.next_free_alias(&mut remaining).await?;

            match self.insert(&candidate, url).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    warn!(alias = %candidate, "Generated alias claimed concurrently, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Creates a link from form input.
    ///
    /// An empty or missing alias means "generate one". All fields are
    /// validated before anything is written, and every failing field is
    /// reported in the error details under its field name.
    pub async fn create_link(&self, url: &str, alias: Option<&str>) -> Result<ShortLink, AppError> {
        match alias.filter(|a| !a.is_empty()) {
            Some(alias) => self.reserve_with_alias(alias, url).await,
            None => self.reserve_generated(url).await,
        }
    }

    /// Deletes a link by alias.
    ///
    /// Deleting an unknown alias is not an error; `Ok(false)` is returned.
    pub async fn delete_link(&self, alias: &str) -> Result<bool, AppError> {
        let deleted = self.repository.delete_by_alias(alias).await?;

        if deleted {
            info!(alias, "Short link deleted");
        } else {
            debug!(alias, "Delete requested for unknown alias");
        }
        Ok(deleted)
    }

    /// Field-level validation shared by both creation paths.
    async fn validate(&self, url: &str, alias: Option<&str>) -> Result<(), AppError> {
        let mut errors = Map::new();

        if url.is_empty() {
            errors.insert("url".to_string(), Value::from(URL_REQUIRED));
        }

        if let Some(alias) = alias {
            if alias.is_empty() {
                errors.insert("alias".to_string(), Value::from("Alias is required"));
            } else if is_reserved(alias)
                || self.repository.find_by_alias(alias).await?.is_some()
            {
                errors.insert("alias".to_string(), Value::from(ALIAS_TAKEN));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::bad_request("Invalid link", Value::Object(errors)))
        }
    }

    async fn insert(&self, alias: &str, url: &str) -> Result<ShortLink, AppError> {
        let link = self
            .repository
            .insert(NewShortLink {
                alias: alias.to_string(),
                url: url.to_string(),
            })
            .await?;

        info!(alias = %link.alias, url = %link.url, "Short link created");
        Ok(link)
    }

    /// Draws candidates until one is free, spending one unit of `remaining`
    /// per candidate.
    async fn next_free_alias(&self, remaining: &mut usize) -> Result<String, AppError> {
        while *remaining > 0 {
            *remaining -= 1;
            let candidate = generate_alias();

            if self.repository.find_by_alias(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            debug!(alias = %candidate, "Generated alias already taken");
        }

        Err(self.exhausted())
    }

    fn exhausted(&self) -> AppError {
        warn!(
            attempts = self.max_alias_attempts,
            "Could not find a free alias"
        );
        AppError::alias_exhausted(
            "Failed to generate a unique alias",
            json!({ "attempts": self.max_alias_attempts }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alias::{ALIAS_ALPHABET, ALIAS_LENGTH};
    use crate::domain::repositories::MockShortLinkRepository;
    use mockall::Sequence;

    fn service(repo: MockShortLinkRepository) -> ShortLinkService<MockShortLinkRepository> {
        ShortLinkService::new(Arc::new(repo), 5)
    }

    fn echo_insert(repo: &mut MockShortLinkRepository) {
        repo.expect_insert()
            .returning(|new_link| Ok(ShortLink::from(new_link)));
    }

    #[tokio::test]
    async fn test_resolve_empty_path_is_not_found() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias().times(0);

        let result = service(repo).resolve("").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_uses_full_path_as_alias() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias()
            .withf(|alias| alias == "team/docs")
            .times(1)
            .returning(|alias| Ok(Some(ShortLink::new(alias, "https://example.org/docs"))));

        let link = service(repo).resolve("team/docs").await.unwrap();

        assert_eq!(link.url, "https://example.org/docs");
    }

    #[tokio::test]
    async fn test_resolve_unknown_alias_is_not_found() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias().returning(|_| Ok(None));

        let result = service(repo).resolve("missing").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_generate_alias_shape() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias().times(1).returning(|_| Ok(None));

        let alias = service(repo).generate_alias().await.unwrap();

        assert_eq!(alias.len(), ALIAS_LENGTH);
        assert!(alias.bytes().all(|b| ALIAS_ALPHABET.contains(&b)));
    }

    #[tokio::test]
    async fn test_generate_alias_retries_occupied_candidates() {
        let mut repo = MockShortLinkRepository::new();
        let mut seq = Sequence::new();
        repo.expect_find_by_alias()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|alias| Ok(Some(ShortLink::new(alias, "https://taken.example"))));
        repo.expect_find_by_alias()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        let result = service(repo).generate_alias().await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_generate_alias_is_bounded() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias()
            .times(5)
            .returning(|alias| Ok(Some(ShortLink::new(alias, "https://taken.example"))));

        let result = service(repo).generate_alias().await;

        match result.unwrap_err() {
            AppError::AliasExhausted { details, .. } => assert_eq!(details["attempts"], 5),
            other => panic!("expected AliasExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reserve_with_alias_success() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias()
            .withf(|alias| alias == "demo")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|new_link| new_link.alias == "demo" && new_link.url == "https://example.org")
            .times(1)
            .returning(|new_link| Ok(ShortLink::from(new_link)));

        let link = service(repo)
            .reserve_with_alias("demo", "https://example.org")
            .await
            .unwrap();

        assert_eq!(link, ShortLink::new("demo", "https://example.org"));
    }

    #[tokio::test]
    async fn test_reserve_with_alias_taken() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias()
            .returning(|alias| Ok(Some(ShortLink::new(alias, "https://other.example"))));
        repo.expect_insert().times(0);

        let result = service(repo)
            .reserve_with_alias("taken", "https://example.org")
            .await;

        match result.unwrap_err() {
            AppError::Validation { details, .. } => {
                assert_eq!(details["alias"], ALIAS_TAKEN);
                assert!(details.get("url").is_none());
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reserve_with_reserved_alias_rejected_without_store_hit() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias().times(0);
        repo.expect_insert().times(0);

        let result = service(repo)
            .reserve_with_alias("new", "https://example.org")
            .await;

        match result.unwrap_err() {
            AppError::Validation { details, .. } => assert_eq!(details["alias"], ALIAS_TAKEN),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reserve_with_alias_reports_all_fields() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias()
            .returning(|alias| Ok(Some(ShortLink::new(alias, "https://other.example"))));
        repo.expect_insert().times(0);

        let result = service(repo).reserve_with_alias("taken", "").await;

        match result.unwrap_err() {
            AppError::Validation { details, .. } => {
                assert_eq!(details["url"], URL_REQUIRED);
                assert_eq!(details["alias"], ALIAS_TAKEN);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reserve_with_alias_lost_race_is_conflict() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias().returning(|_| Ok(None));
        repo.expect_insert().times(1).returning(|new_link| {
            Err(AppError::conflict(
                "Alias already exists",
                json!({ "alias": new_link.alias }),
            ))
        });

        let result = service(repo)
            .reserve_with_alias("dup", "https://example.org")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_reserve_generated_success() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias().times(1).returning(|_| Ok(None));
        echo_insert(&mut repo);

        let link = service(repo)
            .reserve_generated("https://example.org")
            .await
            .unwrap();

        assert_eq!(link.alias.len(), ALIAS_LENGTH);
        assert_eq!(link.url, "https://example.org");
    }

    #[tokio::test]
    async fn test_reserve_generated_requires_url() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias().times(0);
        repo.expect_insert().times(0);

        let result = service(repo).reserve_generated("").await;

        match result.unwrap_err() {
            AppError::Validation { details, .. } => assert_eq!(details["url"], URL_REQUIRED),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reserve_generated_retries_after_lost_race() {
        let mut repo = MockShortLinkRepository::new();
        let mut seq = Sequence::new();
        repo.expect_find_by_alias().returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| {
                Err(AppError::conflict(
                    "Alias already exists",
                    json!({ "alias": new_link.alias }),
                ))
            });
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Ok(ShortLink::from(new_link)));

        let result = service(repo).reserve_generated("https://example.org").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_reserve_generated_exhaustion_counts_lost_races() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias().returning(|_| Ok(None));
        repo.expect_insert().times(5).returning(|new_link| {
            Err(AppError::conflict(
                "Alias already exists",
                json!({ "alias": new_link.alias }),
            ))
        });

        let result = service(repo).reserve_generated("https://example.org").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::AliasExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn test_reserve_generated_shares_budget_between_taken_and_lost() {
        let mut repo = MockShortLinkRepository::new();
        let mut seq = Sequence::new();
        repo.expect_find_by_alias()
            .times(3)
            .in_sequence(&mut seq)
            .returning(|alias| Ok(Some(ShortLink::new(alias, "https://taken.example"))));
        repo.expect_find_by_alias()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| {
                Err(AppError::conflict(
                    "Alias already exists",
                    json!({ "alias": new_link.alias }),
                ))
            });
        repo.expect_find_by_alias()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|alias| Ok(Some(ShortLink::new(alias, "https://taken.example"))));

        let result = service(repo).reserve_generated("https://example.org").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::AliasExhausted { .. }
        ));
    }

    #[tokio::test]
    async fn test_reserve_generated_propagates_store_errors() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        repo.expect_insert().times(0);

        let result = service(repo).reserve_generated("https://example.org").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_link_empty_alias_generates() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias()
            .withf(|alias| alias.len() == ALIAS_LENGTH)
            .times(1)
            .returning(|_| Ok(None));
        echo_insert(&mut repo);

        let link = service(repo)
            .create_link("https://example.org", Some(""))
            .await
            .unwrap();

        assert_eq!(link.alias.len(), ALIAS_LENGTH);
    }

    #[tokio::test]
    async fn test_create_link_with_alias_is_not_normalized() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias()
            .withf(|alias| alias == " Demo ")
            .returning(|_| Ok(None));
        echo_insert(&mut repo);

        let link = service(repo)
            .create_link("https://example.org", Some(" Demo "))
            .await
            .unwrap();

        assert_eq!(link.alias, " Demo ");
    }

    #[tokio::test]
    async fn test_delete_link_unknown_alias_is_benign() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_delete_by_alias()
            .withf(|alias| alias == "missing")
            .times(1)
            .returning(|_| Ok(false));

        let deleted = service(repo).delete_link("missing").await.unwrap();

        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_zero_attempts_is_clamped_to_one() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_alias().times(1).returning(|_| Ok(None));

        let service = ShortLinkService::new(Arc::new(repo), 0);

        assert!(service.generate_alias().await.is_ok());
    }
}
