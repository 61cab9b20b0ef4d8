//! Messages that reach the editors from readers: contact-form messages and
//! article/poem submissions.

use crate::domain::content::{ContentKind, Language};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::Email;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub i64);

impl MessageId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("message id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<MessageId> for i64 {
    fn from(value: MessageId) -> Self {
        value.0
    }
}

fn require(field: &str, value: &str, max_chars: usize) -> DomainResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_chars {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub id: MessageId,
    pub name: String,
    pub email: Email,
    pub subject: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: Email,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl NewContactMessage {
    pub fn validate(&self) -> DomainResult<()> {
        require("name", &self.name, 120)?;
        if let Some(subject) = &self.subject {
            require("subject", subject, 200)?;
        }
        require("message", &self.message, 10_000)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Accepted => "accepted",
            SubmissionStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for SubmissionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(SubmissionStatus::Pending),
            "accepted" => Ok(SubmissionStatus::Accepted),
            "rejected" => Ok(SubmissionStatus::Rejected),
            other => Err(DomainError::Validation(format!(
                "unknown submission status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub id: MessageId,
    pub name: String,
    pub email: Email,
    pub kind: ContentKind,
    pub title: String,
    pub content: String,
    pub language: Language,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: String,
    pub email: Email,
    pub kind: ContentKind,
    pub title: String,
    pub content: String,
    pub language: Language,
    pub created_at: DateTime<Utc>,
}

impl NewSubmission {
    pub fn validate(&self) -> DomainResult<()> {
        require("name", &self.name, 120)?;
        require("title", &self.title, 300)?;
        require("content", &self.content, 100_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_message_requires_body() {
        let msg = NewContactMessage {
            name: "Hana".into(),
            email: Email::new("hana@example.org").unwrap(),
            subject: None,
            message: "   ".into(),
            created_at: Utc::now(),
        };
        assert!(msg.validate().is_err());
    }

    #[test]
    fn submission_status_parses() {
        assert_eq!(
            "Accepted".parse::<SubmissionStatus>().unwrap(),
            SubmissionStatus::Accepted
        );
        assert!("lost".parse::<SubmissionStatus>().is_err());
    }
}
