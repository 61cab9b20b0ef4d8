use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::{Issue, IssueId, IssuePeriod, IssueRepository, IssueUpdate, NewIssue};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, month, year, title, title_am, description, description_am, \
     cover_image, published, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresIssueRepository {
    pool: PgPool,
}

impl PostgresIssueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct IssueRow {
    id: i64,
    month: i32,
    year: i32,
    title: Option<String>,
    title_am: Option<String>,
    description: Option<String>,
    description_am: Option<String>,
    cover_image: Option<String>,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IssueRow> for Issue {
    type Error = DomainError;

    fn try_from(row: IssueRow) -> Result<Self, Self::Error> {
        let month = u32::try_from(row.month)
            .map_err(|_| DomainError::Persistence(format!("invalid month {}", row.month)))?;
        Ok(Issue {
            id: IssueId::new(row.id)?,
            period: IssuePeriod::new(month, row.year)?,
            title: row.title,
            title_am: row.title_am,
            description: row.description,
            description_am: row.description_am,
            cover_image: row.cover_image,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn month_param(period: IssuePeriod) -> i32 {
    // 1..=12 always fits.
    i32::try_from(period.month()).unwrap_or_default()
}

#[async_trait]
impl IssueRepository for PostgresIssueRepository {
    async fn insert(&self, issue: NewIssue) -> DomainResult<Issue> {
        let sql = format!(
            "INSERT INTO issues (month, year, title, title_am, description, description_am, \
             cover_image, published, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, IssueRow>(&sql)
            .bind(month_param(issue.period))
            .bind(issue.period.year())
            .bind(issue.title)
            .bind(issue.title_am)
            .bind(issue.description)
            .bind(issue.description_am)
            .bind(issue.cover_image)
            .bind(issue.published)
            .bind(issue.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Issue::try_from(row)
    }

    async fn update(&self, update: IssueUpdate) -> DomainResult<Issue> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE issues SET updated_at = ");
        builder.push_bind(update.updated_at);

        if let Some(period) = update.period {
            builder.push(", month = ");
            builder.push_bind(month_param(period));
            builder.push(", year = ");
            builder.push_bind(period.year());
        }

        let optional_columns = [
            ("title", update.title),
            ("title_am", update.title_am),
            ("description", update.description),
            ("description_am", update.description_am),
            ("cover_image", update.cover_image),
        ];
        for (column, value) in optional_columns {
            if let Some(value) = value {
                builder.push(format!(", {column} = "));
                builder.push_bind(value);
            }
        }

        if let Some(published) = update.published {
            builder.push(", published = ");
            builder.push_bind(published);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));
        builder.push(" RETURNING ");
        builder.push(COLUMNS);

        let row = builder
            .build_query_as::<IssueRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("issue not found".into()))?;

        Issue::try_from(row)
    }

    async fn delete(&self, id: IssueId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("issue not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: IssueId) -> DomainResult<Option<Issue>> {
        let sql = format!("SELECT {COLUMNS} FROM issues WHERE id = $1");
        let row = sqlx::query_as::<_, IssueRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Issue::try_from).transpose()
    }

    async fn list(&self, published_only: bool) -> DomainResult<Vec<Issue>> {
        let filter = if published_only {
            " WHERE published = TRUE"
        } else {
            ""
        };
        let sql = format!("SELECT {COLUMNS} FROM issues{filter} ORDER BY year DESC, month DESC");
        let rows = sqlx::query_as::<_, IssueRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Issue::try_from).collect()
    }
}
