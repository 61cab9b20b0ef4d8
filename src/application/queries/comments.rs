use std::sync::Arc;

use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, CommentDto, CommentThreadDto},
        error::ApplicationResult,
    },
    domain::{
        comment::{CommentFilter, CommentRepository, CommentStatus, CommentTarget, build_thread},
        content::{ContentId, ContentKind},
    },
};

pub struct CommentQueryService {
    comment_repo: Arc<dyn CommentRepository>,
}

impl CommentQueryService {
    pub fn new(comment_repo: Arc<dyn CommentRepository>) -> Self {
        Self { comment_repo }
    }

    /// Approved comments of one item, nested by reply.
    pub async fn thread(
        &self,
        kind: ContentKind,
        content_id: i64,
    ) -> ApplicationResult<Vec<CommentThreadDto>> {
        let filter = CommentFilter {
            target: Some(CommentTarget {
                kind,
                content_id: ContentId::new(content_id)?,
            }),
            status: Some(CommentStatus::Approved),
        };
        let comments = self.comment_repo.list(filter).await?;
        Ok(build_thread(comments).into_iter().map(Into::into).collect())
    }

    /// Flat listing for the moderation queue.
    pub async fn list_for_moderation(
        &self,
        actor: &AuthenticatedUser,
        target: Option<(ContentKind, i64)>,
        status: Option<CommentStatus>,
    ) -> ApplicationResult<Vec<CommentDto>> {
        ensure_capability(actor, "comments", "moderate")?;
        let target = target
            .map(|(kind, id)| {
                ContentId::new(id).map(|content_id| CommentTarget { kind, content_id })
            })
            .transpose()?;
        let comments = self
            .comment_repo
            .list(CommentFilter { target, status })
            .await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }
}
