use crate::domain::errors::DomainResult;
use crate::domain::issue::entity::{Issue, IssueId, IssueUpdate, NewIssue};
use async_trait::async_trait;

#[async_trait]
pub trait IssueRepository: Send + Sync {
    async fn insert(&self, issue: NewIssue) -> DomainResult<Issue>;
    async fn update(&self, update: IssueUpdate) -> DomainResult<Issue>;
    /// Content assigned to the issue is detached, not deleted.
    async fn delete(&self, id: IssueId) -> DomainResult<()>;
    async fn find_by_id(&self, id: IssueId) -> DomainResult<Option<Issue>>;
    /// Newest period first.
    async fn list(&self, published_only: bool) -> DomainResult<Vec<Issue>>;
}
