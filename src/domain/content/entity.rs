use crate::domain::content::{
    category::Category,
    language::{BilingualText, DisplayMode},
    value_objects::{ContentId, ContentKind, Slug, Tags},
};
use crate::domain::errors::DomainResult;
use crate::domain::issue::IssueId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentStats {
    pub views: i64,
    pub likes: i64,
    pub shares: i64,
}

#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: ContentId,
    pub kind: ContentKind,
    pub slug: Slug,
    pub text: BilingualText,
    pub category: Category,
    pub tags: Tags,
    pub cover_image: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub stats: ContentStats,
    pub author_id: UserId,
    pub issue_id: Option<IssueId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn display_mode(&self) -> DisplayMode {
        self.text.display_mode()
    }

    pub fn publish(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.text.ensure_publishable()?;
        self.published = true;
        if self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn unpublish(&mut self, now: DateTime<Utc>) {
        self.published = false;
        self.published_at = None;
        self.updated_at = now;
    }

    pub fn set_text(&mut self, text: BilingualText, now: DateTime<Utc>) -> DomainResult<()> {
        text.ensure_not_empty()?;
        if self.published {
            text.ensure_publishable()?;
        }
        self.text = text;
        self.updated_at = now;
        Ok(())
    }

    pub fn set_slug(&mut self, slug: Slug, now: DateTime<Utc>) {
        self.slug = slug;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewContent {
    pub kind: ContentKind,
    pub slug: Slug,
    pub text: BilingualText,
    pub category: Category,
    pub tags: Tags,
    pub cover_image: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: UserId,
    pub issue_id: Option<IssueId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PublishStateUpdate {
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// Partial update applied with optimistic concurrency on `updated_at`.
#[derive(Debug, Clone)]
pub struct ContentUpdate {
    pub kind: ContentKind,
    pub id: ContentId,
    pub text: Option<BilingualText>,
    pub slug: Option<Slug>,
    pub category: Option<Category>,
    pub tags: Option<Tags>,
    pub cover_image: Option<Option<String>>,
    pub featured: Option<bool>,
    pub publish_state: Option<PublishStateUpdate>,
    pub author_id: Option<UserId>,
    pub issue_id: Option<Option<IssueId>>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentUpdate {
    pub fn new(kind: ContentKind, id: ContentId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            id,
            text: None,
            slug: None,
            category: None,
            tags: None,
            cover_image: None,
            featured: None,
            publish_state: None,
            author_id: None,
            issue_id: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_text(mut self, text: BilingualText) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_cover_image(mut self, cover_image: Option<String>) -> Self {
        self.cover_image = Some(cover_image);
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn with_publish_state(
        mut self,
        published: bool,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.publish_state = Some(PublishStateUpdate {
            published,
            published_at,
        });
        self
    }

    pub fn with_author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn with_issue(mut self, issue_id: Option<IssueId>) -> Self {
        self.issue_id = Some(issue_id);
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.slug.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.cover_image.is_none()
            && self.featured.is_none()
            && self.publish_state.is_none()
            && self.author_id.is_none()
            && self.issue_id.is_none()
    }
}
