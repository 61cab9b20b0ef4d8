use super::map_sqlx;
use crate::domain::comment::{
    Comment, CommentFilter, CommentId, CommentRepository, CommentStatus, CommentTarget, NewComment,
};
use crate::domain::content::{ContentId, ContentKind};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::Email;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const COLUMNS: &str =
    "id, content_type, content_id, parent_id, author_name, author_email, body, status, created_at";

#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    content_type: String,
    content_id: i64,
    parent_id: Option<i64>,
    author_name: String,
    author_email: Option<String>,
    body: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId::new(row.id)?,
            target: CommentTarget {
                kind: row.content_type.parse::<ContentKind>()?,
                content_id: ContentId::new(row.content_id)?,
            },
            parent_id: row.parent_id.map(CommentId::new).transpose()?,
            author_name: row.author_name,
            author_email: row.author_email.map(Email::new).transpose()?,
            body: row.body,
            status: row.status.parse::<CommentStatus>()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let sql = format!(
            "INSERT INTO comments (content_type, content_id, parent_id, author_name, author_email, \
             body, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(comment.target.kind.as_str())
            .bind(i64::from(comment.target.content_id))
            .bind(comment.parent_id.map(i64::from))
            .bind(comment.author_name)
            .bind(comment.author_email.map(String::from))
            .bind(comment.body)
            .bind(comment.status.as_str())
            .bind(comment.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Comment::try_from(row)
    }

    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        let sql = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Comment::try_from).transpose()
    }

    async fn list(&self, filter: CommentFilter) -> DomainResult<Vec<Comment>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(COLUMNS);
        builder.push(" FROM comments WHERE TRUE");
        if let Some(target) = filter.target {
            builder.push(" AND content_type = ");
            builder.push_bind(target.kind.as_str());
            builder.push(" AND content_id = ");
            builder.push_bind(i64::from(target.content_id));
        }
        if let Some(status) = filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }
        builder.push(" ORDER BY created_at ASC, id ASC");

        let rows = builder
            .build_query_as::<CommentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Comment::try_from).collect()
    }

    async fn update_status(&self, id: CommentId, status: CommentStatus) -> DomainResult<Comment> {
        let sql = format!("UPDATE comments SET status = $1 WHERE id = $2 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(status.as_str())
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("comment not found".into()))?;

        Comment::try_from(row)
    }

    async fn delete(&self, id: CommentId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("comment not found".into()));
        }
        Ok(())
    }
}
