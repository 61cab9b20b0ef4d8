use std::sync::Arc;

use crate::{
    application::{
        dto::ContentDto,
        error::{ApplicationError, ApplicationResult},
        notifications::NotificationService,
        ports::time::Clock,
    },
    domain::{
        content::{
            ContentId, ContentItem, ContentKind, ContentReadRepository, ContentSlugService,
            ContentWriteRepository,
        },
        issue::{IssueId, IssueRepository},
        user::UserRepository,
    },
};

pub struct ContentCommandService {
    pub(super) write_repo: Arc<dyn ContentWriteRepository>,
    pub(super) read_repo: Arc<dyn ContentReadRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) issue_repo: Arc<dyn IssueRepository>,
    pub(super) slug_service: Arc<ContentSlugService>,
    pub(super) notifications: Arc<NotificationService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ContentCommandService {
    pub fn new(
        write_repo: Arc<dyn ContentWriteRepository>,
        read_repo: Arc<dyn ContentReadRepository>,
        user_repo: Arc<dyn UserRepository>,
        issue_repo: Arc<dyn IssueRepository>,
        slug_service: Arc<ContentSlugService>,
        notifications: Arc<NotificationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            user_repo,
            issue_repo,
            slug_service,
            notifications,
            clock,
        }
    }

    pub(super) async fn load(&self, kind: ContentKind, id: i64) -> ApplicationResult<ContentItem> {
        let id = ContentId::new(id)?;
        self.read_repo
            .find_by_id(kind, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{kind} not found")))
    }

    pub(super) async fn resolve_issue(&self, id: Option<i64>) -> ApplicationResult<Option<IssueId>> {
        let Some(raw) = id else {
            return Ok(None);
        };
        let id = IssueId::new(raw)?;
        if self.issue_repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::validation(format!("issue {raw} does not exist")));
        }
        Ok(Some(id))
    }

    pub(super) async fn to_dto(&self, item: ContentItem) -> ApplicationResult<ContentDto> {
        let author = self.user_repo.find_by_id(item.author_id).await?;
        Ok(ContentDto::from(item).with_author(author.as_ref()))
    }

    /// Sends the new-content e-mail when a write moved the item from draft to
    /// published.
    pub(super) async fn announce_if_newly_published(&self, was_published: bool, item: &ContentItem) {
        if item.published && !was_published {
            self.notifications.announce(item).await;
        }
    }
}
