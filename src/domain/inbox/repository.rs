use crate::domain::errors::DomainResult;
use crate::domain::inbox::entity::{
    ContactMessage, MessageId, NewContactMessage, NewSubmission, Submission, SubmissionStatus,
};
use async_trait::async_trait;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn insert(&self, message: NewContactMessage) -> DomainResult<ContactMessage>;
    /// Newest first.
    async fn list(&self) -> DomainResult<Vec<ContactMessage>>;
    async fn mark_read(&self, id: MessageId) -> DomainResult<ContactMessage>;
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn insert(&self, submission: NewSubmission) -> DomainResult<Submission>;
    /// Newest first.
    async fn list(&self, status: Option<SubmissionStatus>) -> DomainResult<Vec<Submission>>;
    async fn update_status(
        &self,
        id: MessageId,
        status: SubmissionStatus,
    ) -> DomainResult<Submission>;
}
