use std::sync::Arc;

use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, CommentDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        comment::{CommentId, CommentRepository, CommentStatus, CommentTarget, NewComment},
        content::{ContentId, ContentKind, ContentReadRepository},
        errors::non_blank,
        user::Email,
    },
};

pub struct PostCommentCommand {
    pub content_type: ContentKind,
    pub content_id: i64,
    pub parent_id: Option<i64>,
    pub author_name: String,
    pub author_email: Option<String>,
    pub body: String,
}

pub struct CommentCommandService {
    comment_repo: Arc<dyn CommentRepository>,
    content_repo: Arc<dyn ContentReadRepository>,
    clock: Arc<dyn Clock>,
}

impl CommentCommandService {
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        content_repo: Arc<dyn ContentReadRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            comment_repo,
            content_repo,
            clock,
        }
    }

    /// New comments wait for moderation.
    pub async fn post_comment(&self, command: PostCommentCommand) -> ApplicationResult<CommentDto> {
        let target = CommentTarget {
            kind: command.content_type,
            content_id: ContentId::new(command.content_id)?,
        };
        let content = self
            .content_repo
            .find_by_id(target.kind, target.content_id)
            .await?
            .filter(|item| item.published)
            .ok_or_else(|| ApplicationError::not_found(format!("{} not found", target.kind)))?;

        let comment = NewComment {
            target,
            parent_id: command.parent_id.map(CommentId::new).transpose()?,
            author_name: command.author_name.trim().to_string(),
            author_email: non_blank(command.author_email).map(Email::new).transpose()?,
            body: command.body.trim().to_string(),
            status: CommentStatus::Pending,
            created_at: self.clock.now(),
        };
        comment.validate()?;

        if let Some(parent_id) = comment.parent_id {
            let parent = self
                .comment_repo
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| ApplicationError::validation("parent comment does not exist"))?;
            comment.ensure_reply_target(&parent)?;
        }

        let created = self.comment_repo.insert(comment).await?;
        tracing::info!(
            kind = %content.kind,
            content_id = content.id.0,
            comment_id = created.id.0,
            "comment received"
        );
        Ok(created.into())
    }

    pub async fn moderate(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        status: CommentStatus,
    ) -> ApplicationResult<CommentDto> {
        ensure_capability(actor, "comments", "moderate")?;
        let id = CommentId::new(id)?;
        let comment = self.comment_repo.update_status(id, status).await?;
        Ok(comment.into())
    }

    pub async fn delete_comment(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        ensure_capability(actor, "comments", "moderate")?;
        let id = CommentId::new(id)?;
        if self.comment_repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("comment not found"));
        }
        self.comment_repo.delete(id).await?;
        Ok(())
    }
}
