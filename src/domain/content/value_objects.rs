use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Articles and poems share one shape; the kind selects the table and the
/// slug namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Poem,
}

impl ContentKind {
    pub const ALL: [ContentKind; 2] = [ContentKind::Article, ContentKind::Poem];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Poem => "poem",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            ContentKind::Article => "articles",
            ContentKind::Poem => "poems",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "article" | "articles" => Ok(ContentKind::Article),
            "poem" | "poems" => Ok(ContentKind::Poem),
            other => Err(DomainError::Validation(format!(
                "unknown content type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub i64);

impl ContentId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "content id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ContentId> for i64 {
    fn from(value: ContentId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation(
                "slug cannot contain whitespace".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag list persisted as a comma-joined string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn parse(joined: &str) -> Self {
        Self::from_iter(joined.split(','))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_joined(&self) -> String {
        self.0.join(",")
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for raw in iter {
            let tag = raw.as_ref().trim();
            if tag.is_empty() {
                continue;
            }
            if tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                continue;
            }
            tags.push(tag.to_string());
        }
        Self(tags)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Views,
    Likes,
    Shares,
}

impl Counter {
    pub fn column(&self) -> &'static str {
        match self {
            Counter::Views => "views",
            Counter::Likes => "likes",
            Counter::Shares => "shares",
        }
    }
}

impl FromStr for Counter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" | "views" => Ok(Counter::Views),
            "like" | "likes" => Ok(Counter::Likes),
            "share" | "shares" => Ok(Counter::Shares),
            other => Err(DomainError::Validation(format!("unknown counter '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_trims_and_dedupes() {
        let tags = Tags::parse(" faith, Hope ,,faith,hope , love");
        assert_eq!(tags.as_slice(), ["faith", "Hope", "love"]);
        assert_eq!(tags.to_joined(), "faith,Hope,love");
    }

    #[test]
    fn empty_tags_join_to_empty_string() {
        let tags = Tags::parse("  , ,");
        assert!(tags.is_empty());
        assert_eq!(tags.to_joined(), "");
    }

    #[test]
    fn content_kind_accepts_plural_forms() {
        assert_eq!("Poems".parse::<ContentKind>().unwrap(), ContentKind::Poem);
        assert_eq!("article".parse::<ContentKind>().unwrap(), ContentKind::Article);
        assert!("issue".parse::<ContentKind>().is_err());
    }

    #[test]
    fn slug_rejects_whitespace() {
        assert!(Slug::new("hello world").is_err());
        assert_eq!(Slug::new(" hello-world ").unwrap().as_str(), "hello-world");
    }
}
