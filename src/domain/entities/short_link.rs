//! Short link entity representing an alias → URL mapping.

use serde::Serialize;

/// A stored mapping from a public alias to its destination URL.
///
/// Aliases are immutable: a link is only ever created or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ShortLink {
    pub alias: String,
    pub url: String,
}

impl ShortLink {
    pub fn new(alias: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            url: url.into(),
        }
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub alias: String,
    pub url: String,
}

impl From<NewShortLink> for ShortLink {
    fn from(new_link: NewShortLink) -> Self {
        Self {
            alias: new_link.alias,
            url: new_link.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_creation() {
        let link = ShortLink::new("demo", "https://example.org");

        assert_eq!(link.alias, "demo");
        assert_eq!(link.url, "https://example.org");
    }

    #[test]
    fn test_new_short_link_into_short_link() {
        let new_link = NewShortLink {
            alias: "abc123".to_string(),
            url: "https://rust-lang.org".to_string(),
        };

        let link: ShortLink = new_link.into();
        assert_eq!(link, ShortLink::new("abc123", "https://rust-lang.org"));
    }
}
