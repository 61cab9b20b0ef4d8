use crate::domain::content::{
    category::Category,
    entity::{ContentItem, ContentUpdate, NewContent},
    value_objects::{ContentId, ContentKind, Counter, Slug},
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::IssueId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Published,
    Draft,
    All,
}

impl StatusFilter {
    pub fn matches(&self, published: bool) -> bool {
        match self {
            StatusFilter::Published => published,
            StatusFilter::Draft => !published,
            StatusFilter::All => true,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "published" => Ok(StatusFilter::Published),
            "draft" | "drafts" | "unpublished" => Ok(StatusFilter::Draft),
            "all" => Ok(StatusFilter::All),
            other => Err(DomainError::Validation(format!("unknown status '{other}'"))),
        }
    }
}

/// Listing criteria. Results are ordered newest first
/// (`published_at` then `created_at`, then id).
#[derive(Debug, Clone)]
pub struct ContentFilter {
    pub status: StatusFilter,
    pub category: Option<Category>,
    pub featured: Option<bool>,
    pub issue_id: Option<IssueId>,
    pub author_id: Option<UserId>,
    /// Case-insensitive substring match over both languages' title, excerpt,
    /// body and the tag string.
    pub search: Option<String>,
    pub published_since: Option<DateTime<Utc>>,
    pub limit: u32,
    pub skip: u32,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self {
            status: StatusFilter::Published,
            category: None,
            featured: None,
            issue_id: None,
            author_id: None,
            search: None,
            published_since: None,
            limit: 20,
            skip: 0,
        }
    }
}

#[async_trait]
pub trait ContentWriteRepository: Send + Sync {
    async fn insert(&self, content: NewContent) -> DomainResult<ContentItem>;
    async fn update(&self, update: ContentUpdate) -> DomainResult<ContentItem>;
    async fn delete(&self, kind: ContentKind, id: ContentId) -> DomainResult<()>;
    /// Atomically bumps a counter and returns its new value.
    async fn increment(&self, kind: ContentKind, id: ContentId, counter: Counter)
    -> DomainResult<i64>;
}

#[async_trait]
pub trait ContentReadRepository: Send + Sync {
    async fn find_by_id(&self, kind: ContentKind, id: ContentId)
    -> DomainResult<Option<ContentItem>>;
    async fn find_by_slug(&self, kind: ContentKind, slug: &Slug)
    -> DomainResult<Option<ContentItem>>;
    async fn list(&self, kind: ContentKind, filter: &ContentFilter) -> DomainResult<Vec<ContentItem>>;
    async fn count(&self, kind: ContentKind, filter: &ContentFilter) -> DomainResult<u64>;
}
