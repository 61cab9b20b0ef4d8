use crate::domain::comment::entity::{
    Comment, CommentId, CommentStatus, CommentTarget, NewComment,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct CommentFilter {
    pub target: Option<CommentTarget>,
    pub status: Option<CommentStatus>,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment>;
    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>>;
    /// Oldest first.
    async fn list(&self, filter: CommentFilter) -> DomainResult<Vec<Comment>>;
    async fn update_status(&self, id: CommentId, status: CommentStatus) -> DomainResult<Comment>;
    /// Replies are removed together with their parent.
    async fn delete(&self, id: CommentId) -> DomainResult<()>;
}
