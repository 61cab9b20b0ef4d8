use crate::domain::content::{ContentKind, Language};
use crate::domain::inbox::{ContactMessage, Submission, SubmissionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for ContactMessageDto {
    fn from(msg: ContactMessage) -> Self {
        Self {
            id: msg.id.into(),
            name: msg.name,
            email: msg.email.into(),
            subject: msg.subject,
            message: msg.message,
            read: msg.read,
            created_at: msg.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    pub content: String,
    pub language: Language,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionDto {
    fn from(sub: Submission) -> Self {
        Self {
            id: sub.id.into(),
            name: sub.name,
            email: sub.email.into(),
            kind: sub.kind,
            title: sub.title,
            content: sub.content,
            language: sub.language,
            status: sub.status,
            created_at: sub.created_at,
        }
    }
}
