use std::sync::Arc;

use crate::{
    application::{
        capability::{can, require_capability},
        dto::{AuthenticatedUser, IssueDetailDto, IssueDto},
        error::{ApplicationError, ApplicationResult},
        queries::content::ContentQueryService,
    },
    domain::{
        content::{ContentFilter, ContentKind, ContentReadRepository, StatusFilter},
        issue::{IssueId, IssueRepository},
    },
};

const ISSUE_CONTENT_LIMIT: u32 = 100;

pub struct IssueQueryService {
    issue_repo: Arc<dyn IssueRepository>,
    content_repo: Arc<dyn ContentReadRepository>,
    content_queries: Arc<ContentQueryService>,
}

impl IssueQueryService {
    pub fn new(
        issue_repo: Arc<dyn IssueRepository>,
        content_repo: Arc<dyn ContentReadRepository>,
        content_queries: Arc<ContentQueryService>,
    ) -> Self {
        Self {
            issue_repo,
            content_repo,
            content_queries,
        }
    }

    pub async fn list_issues(
        &self,
        actor: Option<&AuthenticatedUser>,
        include_unpublished: bool,
    ) -> ApplicationResult<Vec<IssueDto>> {
        if include_unpublished {
            require_capability(actor, "issues", "manage")?;
        }
        let issues = self.issue_repo.list(!include_unpublished).await?;
        Ok(issues.into_iter().map(Into::into).collect())
    }

    /// Issue plus its articles and poems. Unpublished issues and draft
    /// content are only shown to issue managers.
    pub async fn get_issue(
        &self,
        actor: Option<&AuthenticatedUser>,
        id: i64,
    ) -> ApplicationResult<IssueDetailDto> {
        let manager = can(actor, "issues", "manage");
        let issue = self
            .issue_repo
            .find_by_id(IssueId::new(id)?)
            .await?
            .filter(|issue| issue.published || manager)
            .ok_or_else(|| ApplicationError::not_found("issue not found"))?;

        let filter = ContentFilter {
            status: if manager {
                StatusFilter::All
            } else {
                StatusFilter::Published
            },
            issue_id: Some(issue.id),
            limit: ISSUE_CONTENT_LIMIT,
            ..ContentFilter::default()
        };
        let articles = self.content_repo.list(ContentKind::Article, &filter).await?;
        let poems = self.content_repo.list(ContentKind::Poem, &filter).await?;

        Ok(IssueDetailDto {
            issue: issue.into(),
            articles: self.content_queries.with_authors(articles).await?,
            poems: self.content_queries.with_authors(poems).await?,
        })
    }
}
