use super::ContentQueryService;
use crate::{
    application::{
        capability::require_capability,
        dto::{AuthenticatedUser, ContentPageDto},
        error::ApplicationResult,
    },
    domain::{
        content::{Category, ContentFilter, ContentKind, StatusFilter},
        errors::non_blank,
        issue::IssueId,
        user::UserId,
    },
};

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Default)]
pub struct ListContentQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub issue_id: Option<i64>,
    pub author_id: Option<i64>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

impl ContentQueryService {
    pub async fn list_content(
        &self,
        actor: Option<&AuthenticatedUser>,
        kind: ContentKind,
        query: ListContentQuery,
    ) -> ApplicationResult<ContentPageDto> {
        let filter = Self::build_filter(actor, query)?;
        let items = self.read_repo.list(kind, &filter).await?;
        let total = self.read_repo.count(kind, &filter).await?;
        Ok(ContentPageDto {
            items: self.with_authors(items).await?,
            total,
            limit: filter.limit,
            skip: filter.skip,
        })
    }

    pub(super) fn build_filter(
        actor: Option<&AuthenticatedUser>,
        query: ListContentQuery,
    ) -> ApplicationResult<ContentFilter> {
        let status = match non_blank(query.status) {
            Some(raw) => raw.parse::<StatusFilter>()?,
            None => StatusFilter::Published,
        };
        if status != StatusFilter::Published {
            require_capability(actor, "content", "view_drafts")?;
        }

        let category = non_blank(query.category)
            .map(|raw| raw.parse::<Category>())
            .transpose()?;
        let issue_id = query.issue_id.map(IssueId::new).transpose()?;
        let author_id = query.author_id.map(UserId::new).transpose()?;

        Ok(ContentFilter {
            status,
            category,
            featured: query.featured,
            issue_id,
            author_id,
            search: non_blank(query.search),
            published_since: None,
            limit: normalize_limit(query.limit),
            skip: query.skip.unwrap_or(0),
        })
    }
}

pub(crate) fn normalize_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => DEFAULT_LIMIT,
        Some(value) => value.min(MAX_LIMIT),
    }
}
