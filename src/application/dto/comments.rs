use crate::domain::comment::{Comment, CommentNode, CommentStatus};
use crate::domain::content::ContentKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub content_type: ContentKind,
    pub content_id: i64,
    pub parent_id: Option<i64>,
    pub author_name: String,
    pub body: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.into(),
            content_type: comment.target.kind,
            content_id: comment.target.content_id.into(),
            parent_id: comment.parent_id.map(Into::into),
            author_name: comment.author_name,
            body: comment.body,
            status: comment.status,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentThreadDto {
    #[serde(flatten)]
    pub comment: CommentDto,
    pub replies: Vec<CommentThreadDto>,
}

impl From<CommentNode> for CommentThreadDto {
    fn from(node: CommentNode) -> Self {
        Self {
            comment: node.comment.into(),
            replies: node.replies.into_iter().map(Into::into).collect(),
        }
    }
}
