use std::sync::Arc;

use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, IssueDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        errors::non_blank,
        issue::{IssueId, IssuePeriod, IssueRepository, IssueUpdate, NewIssue},
    },
};

pub struct CreateIssueCommand {
    pub month: u32,
    pub year: i32,
    pub title: Option<String>,
    pub title_am: Option<String>,
    pub description: Option<String>,
    pub description_am: Option<String>,
    pub cover_image: Option<String>,
    pub published: bool,
}

#[derive(Default)]
pub struct UpdateIssueCommand {
    pub id: i64,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub title: Option<Option<String>>,
    pub title_am: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub description_am: Option<Option<String>>,
    pub cover_image: Option<Option<String>>,
    pub published: Option<bool>,
}

pub struct IssueCommandService {
    issue_repo: Arc<dyn IssueRepository>,
    clock: Arc<dyn Clock>,
}

impl IssueCommandService {
    pub fn new(issue_repo: Arc<dyn IssueRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { issue_repo, clock }
    }

    pub async fn create_issue(
        &self,
        actor: &AuthenticatedUser,
        command: CreateIssueCommand,
    ) -> ApplicationResult<IssueDto> {
        ensure_capability(actor, "issues", "manage")?;
        let issue = NewIssue {
            period: IssuePeriod::new(command.month, command.year)?,
            title: non_blank(command.title),
            title_am: non_blank(command.title_am),
            description: non_blank(command.description),
            description_am: non_blank(command.description_am),
            cover_image: non_blank(command.cover_image),
            published: command.published,
            created_at: self.clock.now(),
        };
        issue.ensure_titled()?;
        let created = self.issue_repo.insert(issue).await?;
        Ok(created.into())
    }

    pub async fn update_issue(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateIssueCommand,
    ) -> ApplicationResult<IssueDto> {
        ensure_capability(actor, "issues", "manage")?;
        let id = IssueId::new(command.id)?;
        let current = self
            .issue_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("issue not found"))?;

        let mut update = IssueUpdate::new(id, self.clock.now());
        if command.month.is_some() || command.year.is_some() {
            update.period = Some(IssuePeriod::new(
                command.month.unwrap_or(current.period.month()),
                command.year.unwrap_or(current.period.year()),
            )?);
        }
        update.title = command.title.map(non_blank);
        update.title_am = command.title_am.map(non_blank);
        update.description = command.description.map(non_blank);
        update.description_am = command.description_am.map(non_blank);
        update.cover_image = command.cover_image.map(non_blank);
        update.published = command.published;

        let next = update.apply_to(&current);
        if next.title.is_none() && next.title_am.is_none() {
            return Err(ApplicationError::validation(
                "an issue needs a title in at least one language",
            ));
        }

        let updated = self.issue_repo.update(update).await?;
        Ok(updated.into())
    }

    /// Articles and poems of the issue stay and lose their issue link.
    pub async fn delete_issue(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        ensure_capability(actor, "issues", "manage")?;
        let id = IssueId::new(id)?;
        if self.issue_repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("issue not found"));
        }
        self.issue_repo.delete(id).await?;
        Ok(())
    }
}
