use std::sync::Arc;

use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, ContactMessageDto, SubmissionDto},
        error::ApplicationResult,
        ports::time::Clock,
    },
    domain::{
        content::{ContentKind, Language},
        errors::non_blank,
        inbox::{
            ContactRepository, MessageId, NewContactMessage, NewSubmission, SubmissionRepository,
            SubmissionStatus,
        },
        user::Email,
    },
};

pub struct SendContactMessageCommand {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

pub struct SubmitWorkCommand {
    pub name: String,
    pub email: String,
    pub kind: ContentKind,
    pub title: String,
    pub content: String,
    pub language: Option<Language>,
}

pub struct InboxCommandService {
    contact_repo: Arc<dyn ContactRepository>,
    submission_repo: Arc<dyn SubmissionRepository>,
    clock: Arc<dyn Clock>,
}

impl InboxCommandService {
    pub fn new(
        contact_repo: Arc<dyn ContactRepository>,
        submission_repo: Arc<dyn SubmissionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            contact_repo,
            submission_repo,
            clock,
        }
    }

    pub async fn send_contact_message(
        &self,
        command: SendContactMessageCommand,
    ) -> ApplicationResult<ContactMessageDto> {
        let message = NewContactMessage {
            name: command.name.trim().to_string(),
            email: Email::new(command.email)?,
            subject: non_blank(command.subject),
            message: command.message.trim().to_string(),
            created_at: self.clock.now(),
        };
        message.validate()?;
        let stored = self.contact_repo.insert(message).await?;
        tracing::info!(message_id = stored.id.0, "contact message received");
        Ok(stored.into())
    }

    pub async fn mark_read(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<ContactMessageDto> {
        ensure_capability(actor, "inbox", "read")?;
        let message = self.contact_repo.mark_read(MessageId::new(id)?).await?;
        Ok(message.into())
    }

    pub async fn submit_work(&self, command: SubmitWorkCommand) -> ApplicationResult<SubmissionDto> {
        let submission = NewSubmission {
            name: command.name.trim().to_string(),
            email: Email::new(command.email)?,
            kind: command.kind,
            title: command.title.trim().to_string(),
            content: command.content.trim().to_string(),
            language: command.language.unwrap_or(Language::English),
            created_at: self.clock.now(),
        };
        submission.validate()?;
        let stored = self.submission_repo.insert(submission).await?;
        tracing::info!(submission_id = stored.id.0, kind = %stored.kind, "submission received");
        Ok(stored.into())
    }

    pub async fn review_submission(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        status: SubmissionStatus,
    ) -> ApplicationResult<SubmissionDto> {
        ensure_capability(actor, "inbox", "read")?;
        let submission = self
            .submission_repo
            .update_status(MessageId::new(id)?, status)
            .await?;
        Ok(submission.into())
    }
}
