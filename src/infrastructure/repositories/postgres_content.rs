// src/infrastructure/repositories/postgres_content.rs
use super::{error::like_pattern, map_sqlx};
use crate::domain::content::{
    BilingualText, Category, ContentFilter, ContentId, ContentItem, ContentKind,
    ContentReadRepository, ContentStats, ContentUpdate, ContentWriteRepository, Counter,
    NewContent, Slug, StatusFilter, Tags,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::IssueId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const COLUMNS: &str = "id, slug, title, title_am, excerpt, excerpt_am, content, content_am, \
     category, tags, cover_image, published, featured, published_at, views, likes, shares, \
     author_id, issue_id, created_at, updated_at";

fn table(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Article => "articles",
        ContentKind::Poem => "poems",
    }
}

#[derive(Clone)]
pub struct PostgresContentWriteRepository {
    pool: PgPool,
}

impl PostgresContentWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresContentReadRepository {
    pool: PgPool,
}

impl PostgresContentReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContentRow {
    id: i64,
    slug: String,
    title: Option<String>,
    title_am: Option<String>,
    excerpt: Option<String>,
    excerpt_am: Option<String>,
    content: Option<String>,
    content_am: Option<String>,
    category: String,
    tags: String,
    cover_image: Option<String>,
    published: bool,
    featured: bool,
    published_at: Option<DateTime<Utc>>,
    views: i64,
    likes: i64,
    shares: i64,
    author_id: i64,
    issue_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContentRow {
    fn into_item(self, kind: ContentKind) -> DomainResult<ContentItem> {
        Ok(ContentItem {
            id: ContentId::new(self.id)?,
            kind,
            slug: Slug::new(self.slug)?,
            text: BilingualText::new(
                self.title,
                self.title_am,
                self.excerpt,
                self.excerpt_am,
                self.content,
                self.content_am,
            ),
            category: self.category.parse::<Category>()?,
            tags: Tags::parse(&self.tags),
            cover_image: self.cover_image,
            published: self.published,
            featured: self.featured,
            published_at: self.published_at,
            stats: ContentStats {
                views: self.views,
                likes: self.likes,
                shares: self.shares,
            },
            author_id: UserId::new(self.author_id)?,
            issue_id: self.issue_id.map(IssueId::new).transpose()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl ContentWriteRepository for PostgresContentWriteRepository {
    async fn insert(&self, content: NewContent) -> DomainResult<ContentItem> {
        let NewContent {
            kind,
            slug,
            text,
            category,
            tags,
            cover_image,
            published,
            featured,
            published_at,
            author_id,
            issue_id,
            created_at,
            updated_at,
        } = content;

        let sql = format!(
            "INSERT INTO {} (slug, title, title_am, excerpt, excerpt_am, content, content_am, \
             category, tags, cover_image, published, featured, published_at, author_id, issue_id, \
             created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}",
            table(kind)
        );

        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(slug.as_str())
            .bind(text.title)
            .bind(text.title_am)
            .bind(text.excerpt)
            .bind(text.excerpt_am)
            .bind(text.content)
            .bind(text.content_am)
            .bind(category.as_str())
            .bind(tags.to_joined())
            .bind(cover_image)
            .bind(published)
            .bind(featured)
            .bind(published_at)
            .bind(i64::from(author_id))
            .bind(issue_id.map(i64::from))
            .bind(created_at)
            .bind(updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.into_item(kind)
    }

    async fn update(&self, update: ContentUpdate) -> DomainResult<ContentItem> {
        let ContentUpdate {
            kind,
            id,
            text,
            slug,
            category,
            tags,
            cover_image,
            featured,
            publish_state,
            author_id,
            issue_id,
            original_updated_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE ");
        builder.push(table(kind));
        builder.push(" SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(text) = text {
            builder.push(", title = ");
            builder.push_bind(text.title);
            builder.push(", title_am = ");
            builder.push_bind(text.title_am);
            builder.push(", excerpt = ");
            builder.push_bind(text.excerpt);
            builder.push(", excerpt_am = ");
            builder.push_bind(text.excerpt_am);
            builder.push(", content = ");
            builder.push_bind(text.content);
            builder.push(", content_am = ");
            builder.push_bind(text.content_am);
        }

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }

        if let Some(category) = category {
            builder.push(", category = ");
            builder.push_bind(category.as_str());
        }

        if let Some(tags) = tags {
            builder.push(", tags = ");
            builder.push_bind(tags.to_joined());
        }

        if let Some(cover_image) = cover_image {
            builder.push(", cover_image = ");
            builder.push_bind(cover_image);
        }

        if let Some(featured) = featured {
            builder.push(", featured = ");
            builder.push_bind(featured);
        }

        if let Some(state) = publish_state {
            builder.push(", published = ");
            builder.push_bind(state.published);
            builder.push(", published_at = ");
            builder.push_bind(state.published_at);
        }

        if let Some(author_id) = author_id {
            builder.push(", author_id = ");
            builder.push_bind(i64::from(author_id));
        }

        if let Some(issue_id) = issue_id {
            builder.push(", issue_id = ");
            builder.push_bind(issue_id.map(i64::from));
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(" RETURNING ");
        builder.push(COLUMNS);

        let maybe_row = builder
            .build_query_as::<ContentRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let row = maybe_row.ok_or_else(|| {
            DomainError::Conflict(format!("{kind} update conflict, please retry"))
        })?;

        row.into_item(kind)
    }

    /// Removes the item and its comments in one transaction.
    async fn delete(&self, kind: ContentKind, id: ContentId) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        sqlx::query("DELETE FROM comments WHERE content_type = $1 AND content_id = $2")
            .bind(kind.as_str())
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let sql = format!("DELETE FROM {} WHERE id = $1", table(kind));
        let result = sqlx::query(&sql)
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("{kind} not found")));
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }

    /// Counters leave `updated_at` alone so they never conflict with edits.
    async fn increment(
        &self,
        kind: ContentKind,
        id: ContentId,
        counter: Counter,
    ) -> DomainResult<i64> {
        let column = counter.column();
        let sql = format!(
            "UPDATE {} SET {column} = {column} + 1 WHERE id = $1 RETURNING {column}",
            table(kind)
        );
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound(format!("{kind} not found")))
    }
}

impl PostgresContentReadRepository {
    fn apply_conditions<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a ContentFilter) {
        builder.push(" WHERE TRUE");

        match filter.status {
            StatusFilter::Published => {
                builder.push(" AND published = TRUE");
            }
            StatusFilter::Draft => {
                builder.push(" AND published = FALSE");
            }
            StatusFilter::All => {}
        }

        if let Some(category) = filter.category {
            builder.push(" AND category = ");
            builder.push_bind(category.as_str());
        }

        if let Some(featured) = filter.featured {
            builder.push(" AND featured = ");
            builder.push_bind(featured);
        }

        if let Some(issue_id) = filter.issue_id {
            builder.push(" AND issue_id = ");
            builder.push_bind(i64::from(issue_id));
        }

        if let Some(author_id) = filter.author_id {
            builder.push(" AND author_id = ");
            builder.push_bind(i64::from(author_id));
        }

        if let Some(since) = filter.published_since {
            builder.push(" AND published_at >= ");
            builder.push_bind(since);
        }

        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = like_pattern(term);
            builder.push(" AND (");
            let mut separated = builder.separated(" OR ");
            for column in [
                "title",
                "title_am",
                "excerpt",
                "excerpt_am",
                "content",
                "content_am",
                "tags",
            ] {
                separated.push(format!("{column} ILIKE "));
                separated.push_bind_unseparated(pattern.clone());
            }
            builder.push(")");
        }
    }
}

#[async_trait]
impl ContentReadRepository for PostgresContentReadRepository {
    async fn find_by_id(
        &self,
        kind: ContentKind,
        id: ContentId,
    ) -> DomainResult<Option<ContentItem>> {
        let sql = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", table(kind));
        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(|row| row.into_item(kind)).transpose()
    }

    async fn find_by_slug(
        &self,
        kind: ContentKind,
        slug: &Slug,
    ) -> DomainResult<Option<ContentItem>> {
        let sql = format!("SELECT {COLUMNS} FROM {} WHERE slug = $1", table(kind));
        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(|row| row.into_item(kind)).transpose()
    }

    async fn list(
        &self,
        kind: ContentKind,
        filter: &ContentFilter,
    ) -> DomainResult<Vec<ContentItem>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(COLUMNS);
        builder.push(" FROM ");
        builder.push(table(kind));
        Self::apply_conditions(&mut builder, filter);
        builder.push(" ORDER BY published_at DESC NULLS LAST, created_at DESC, id DESC");
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(filter.limit.clamp(1, 100)));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(filter.skip));

        let rows = builder
            .build_query_as::<ContentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(|row| row.into_item(kind)).collect()
    }

    async fn count(&self, kind: ContentKind, filter: &ContentFilter) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(1) FROM ");
        builder.push(table(kind));
        Self::apply_conditions(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}
