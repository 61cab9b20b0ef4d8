use super::map_sqlx;
use crate::domain::content::{ContentKind, Language};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::inbox::{
    ContactMessage, ContactRepository, MessageId, NewContactMessage, NewSubmission, Submission,
    SubmissionRepository, SubmissionStatus,
};
use crate::domain::user::Email;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const CONTACT_COLUMNS: &str = "id, name, email, subject, message, read, created_at";
const SUBMISSION_COLUMNS: &str =
    "id, name, email, content_type, title, content, language, status, created_at";

#[derive(Clone)]
pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContactRow {
    id: i64,
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for ContactMessage {
    type Error = DomainError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        Ok(ContactMessage {
            id: MessageId::new(row.id)?,
            name: row.name,
            email: Email::new(row.email)?,
            subject: row.subject,
            message: row.message,
            read: row.read,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct SubmissionRow {
    id: i64,
    name: String,
    email: String,
    content_type: String,
    title: String,
    content: String,
    language: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = DomainError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        Ok(Submission {
            id: MessageId::new(row.id)?,
            name: row.name,
            email: Email::new(row.email)?,
            kind: row.content_type.parse::<ContentKind>()?,
            title: row.title,
            content: row.content,
            language: row.language.parse::<Language>()?,
            status: row.status.parse::<SubmissionStatus>()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn insert(&self, message: NewContactMessage) -> DomainResult<ContactMessage> {
        let sql = format!(
            "INSERT INTO contact_messages (name, email, subject, message, read, created_at)
             VALUES ($1, $2, $3, $4, FALSE, $5)
             RETURNING {CONTACT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(message.name)
            .bind(message.email.as_str())
            .bind(message.subject)
            .bind(message.message)
            .bind(message.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        ContactMessage::try_from(row)
    }

    async fn list(&self) -> DomainResult<Vec<ContactMessage>> {
        let sql =
            format!("SELECT {CONTACT_COLUMNS} FROM contact_messages ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, ContactRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(ContactMessage::try_from).collect()
    }

    async fn mark_read(&self, id: MessageId) -> DomainResult<ContactMessage> {
        let sql = format!(
            "UPDATE contact_messages SET read = TRUE WHERE id = $1 RETURNING {CONTACT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("message not found".into()))?;

        ContactMessage::try_from(row)
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn insert(&self, submission: NewSubmission) -> DomainResult<Submission> {
        let sql = format!(
            "INSERT INTO submissions (name, email, content_type, title, content, language, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7)
             RETURNING {SUBMISSION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(submission.name)
            .bind(submission.email.as_str())
            .bind(submission.kind.as_str())
            .bind(submission.title)
            .bind(submission.content)
            .bind(submission.language.code())
            .bind(submission.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Submission::try_from(row)
    }

    async fn list(&self, status: Option<SubmissionStatus>) -> DomainResult<Vec<Submission>> {
        let sql = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Submission::try_from).collect()
    }

    async fn update_status(
        &self,
        id: MessageId,
        status: SubmissionStatus,
    ) -> DomainResult<Submission> {
        let sql = format!(
            "UPDATE submissions SET status = $1 WHERE id = $2 RETURNING {SUBMISSION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(status.as_str())
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("submission not found".into()))?;

        Submission::try_from(row)
    }
}
