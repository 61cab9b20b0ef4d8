use crate::domain::content::{
    Category, ContentItem, ContentKind, DisplayMode, Language, LocalizedView,
};
use crate::domain::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummaryDto {
    pub id: i64,
    pub name: String,
}

impl From<&User> for AuthorSummaryDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into(),
            name: user.name.to_string(),
        }
    }
}

/// One language block of the render path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedViewDto {
    pub language: Language,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub content: String,
}

impl From<LocalizedView<'_>> for LocalizedViewDto {
    fn from(view: LocalizedView<'_>) -> Self {
        Self {
            language: view.language,
            title: view.title.to_string(),
            excerpt: view.excerpt.map(str::to_string),
            content: view.content.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDto {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub slug: String,
    pub title: Option<String>,
    pub title_am: Option<String>,
    pub excerpt: Option<String>,
    pub excerpt_am: Option<String>,
    pub content: Option<String>,
    pub content_am: Option<String>,
    pub display_mode: DisplayMode,
    pub sections: Vec<LocalizedViewDto>,
    pub category: Category,
    pub category_color: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub likes: i64,
    pub shares: i64,
    pub author_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorSummaryDto>,
    pub issue_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentDto {
    pub fn with_author(mut self, author: Option<&User>) -> Self {
        self.author = author.map(AuthorSummaryDto::from);
        self
    }
}

impl From<ContentItem> for ContentDto {
    fn from(item: ContentItem) -> Self {
        let resolved = item.text.resolve();
        let display_mode = resolved.mode;
        let sections = resolved
            .sections
            .into_iter()
            .map(LocalizedViewDto::from)
            .collect();
        let text = item.text;
        Self {
            id: item.id.into(),
            kind: item.kind,
            slug: item.slug.into_inner(),
            title: text.title,
            title_am: text.title_am,
            excerpt: text.excerpt,
            excerpt_am: text.excerpt_am,
            content: text.content,
            content_am: text.content_am,
            display_mode,
            sections,
            category: item.category,
            category_color: item.category.color().to_string(),
            tags: item.tags.into_inner(),
            cover_image: item.cover_image,
            published: item.published,
            featured: item.featured,
            published_at: item.published_at,
            views: item.stats.views,
            likes: item.stats.likes,
            shares: item.stats.shares,
            author_id: item.author_id.into(),
            author: None,
            issue_id: item.issue_id.map(Into::into),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPageDto {
    pub items: Vec<ContentDto>,
    pub total: u64,
    pub limit: u32,
    pub skip: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub key: Category,
    pub label: String,
    pub label_am: String,
    pub color: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            key: category,
            label: category.label().to_string(),
            label_am: category.label_am().to_string(),
            color: category.color().to_string(),
        }
    }
}

/// Counter value returned by view/like/share endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDto {
    pub count: i64,
}
