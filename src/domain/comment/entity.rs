use crate::domain::content::{ContentId, ContentKind};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::Email;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(pub i64);

impl CommentId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("comment id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<CommentId> for i64 {
    fn from(value: CommentId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::Pending => "pending",
            CommentStatus::Approved => "approved",
            CommentStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for CommentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(CommentStatus::Pending),
            "approved" => Ok(CommentStatus::Approved),
            "rejected" => Ok(CommentStatus::Rejected),
            other => Err(DomainError::Validation(format!(
                "unknown comment status '{other}'"
            ))),
        }
    }
}

/// The article or poem a comment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentTarget {
    pub kind: ContentKind,
    pub content_id: ContentId,
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub target: CommentTarget,
    pub parent_id: Option<CommentId>,
    pub author_name: String,
    pub author_email: Option<Email>,
    pub body: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub target: CommentTarget,
    pub parent_id: Option<CommentId>,
    pub author_name: String,
    pub author_email: Option<Email>,
    pub body: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub const MAX_BODY_CHARS: usize = 5000;

    pub fn validate(&self) -> DomainResult<()> {
        if self.author_name.trim().is_empty() {
            return Err(DomainError::Validation("name is required".into()));
        }
        let body = self.body.trim();
        if body.is_empty() {
            return Err(DomainError::Validation("comment cannot be empty".into()));
        }
        if body.chars().count() > Self::MAX_BODY_CHARS {
            return Err(DomainError::Validation(format!(
                "comment must be at most {} characters",
                Self::MAX_BODY_CHARS
            )));
        }
        Ok(())
    }

    /// Replies must stay on the same article or poem as their parent.
    pub fn ensure_reply_target(&self, parent: &Comment) -> DomainResult<()> {
        if parent.target != self.target {
            return Err(DomainError::Validation(
                "reply must target the same content as its parent".into(),
            ));
        }
        Ok(())
    }
}
