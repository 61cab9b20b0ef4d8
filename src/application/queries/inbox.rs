use std::sync::Arc;

use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, ContactMessageDto, SubmissionDto},
        error::ApplicationResult,
    },
    domain::inbox::{ContactRepository, SubmissionRepository, SubmissionStatus},
};

pub struct InboxQueryService {
    contact_repo: Arc<dyn ContactRepository>,
    submission_repo: Arc<dyn SubmissionRepository>,
}

impl InboxQueryService {
    pub fn new(
        contact_repo: Arc<dyn ContactRepository>,
        submission_repo: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            contact_repo,
            submission_repo,
        }
    }

    pub async fn list_messages(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<ContactMessageDto>> {
        ensure_capability(actor, "inbox", "read")?;
        let messages = self.contact_repo.list().await?;
        Ok(messages.into_iter().map(Into::into).collect())
    }

    pub async fn list_submissions(
        &self,
        actor: &AuthenticatedUser,
        status: Option<SubmissionStatus>,
    ) -> ApplicationResult<Vec<SubmissionDto>> {
        ensure_capability(actor, "inbox", "read")?;
        let submissions = self.submission_repo.list(status).await?;
        Ok(submissions.into_iter().map(Into::into).collect())
    }
}
