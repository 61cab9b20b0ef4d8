use super::ContentCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, ContentDto},
        editor::{AuthorRef, TagsInput, TextPatch},
        error::ApplicationResult,
    },
    domain::{
        content::{Category, ContentItem, ContentKind, ContentUpdate, Tags},
        errors::non_blank,
    },
};

#[derive(Default)]
pub struct UpdateContentCommand {
    pub id: i64,
    pub text: TextPatch,
    pub category: Option<String>,
    pub tags: Option<TagsInput>,
    pub cover_image: Option<Option<String>>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
    pub author_id: Option<i64>,
    pub author_name: Option<String>,
    pub issue_id: Option<Option<i64>>,
}

impl ContentCommandService {
    pub async fn update_content(
        &self,
        actor: &AuthenticatedUser,
        kind: ContentKind,
        command: UpdateContentCommand,
    ) -> ApplicationResult<ContentDto> {
        ensure_capability(actor, "content", "update")?;
        let mut item = self.load(kind, command.id).await?;
        let was_published = item.published;
        let now = self.clock.now();
        let mut update = ContentUpdate::new(kind, item.id, item.updated_at);

        // Unpublishing lands before the text patch so the new text is checked
        // against the draft rules; publishing lands after it so the new text
        // must be publishable.
        let target = command.published.filter(|p| *p != item.published);
        if target.is_some() {
            ensure_capability(actor, "content", "publish")?;
        }
        if target == Some(false) {
            item.unpublish(now);
        }

        if !command.text.is_empty() {
            update = self.apply_text(&mut item, command.text, update).await?;
        }
        if let Some(raw) = command.category {
            update = update.with_category(raw.parse::<Category>()?);
        }
        if let Some(tags) = command.tags {
            update = update.with_tags(Tags::from(tags));
        }
        if let Some(cover) = command.cover_image {
            update = update.with_cover_image(non_blank(cover));
        }
        if let Some(featured) = command.featured {
            update = update.with_featured(featured);
        }

        let author = match (command.author_id, non_blank(command.author_name)) {
            (Some(id), _) => Some(AuthorRef::Id(id)),
            (None, Some(name)) => Some(AuthorRef::Name(name)),
            (None, None) => None,
        };
        if author.is_some() {
            let author_id = self.resolve_author(actor, author).await?;
            update = update.with_author(author_id);
        }
        if let Some(issue) = command.issue_id {
            let issue_id = self.resolve_issue(issue).await?;
            update = update.with_issue(issue_id);
        }

        if target == Some(true) {
            item.publish(now)?;
        }
        if target.is_some() {
            update = update.with_publish_state(item.published, item.published_at);
        }

        if update.is_empty() {
            return self.to_dto(item).await;
        }

        update.set_updated_at(now);
        let updated = self.write_repo.update(update).await?;
        self.announce_if_newly_published(was_published, &updated).await;
        self.to_dto(updated).await
    }

    async fn apply_text(
        &self,
        item: &mut ContentItem,
        patch: TextPatch,
        mut update: ContentUpdate,
    ) -> ApplicationResult<ContentUpdate> {
        let now = self.clock.now();
        let previous_title = item.text.primary_title().map(str::to_string);
        let text = patch.apply(&item.text)?;
        item.set_text(text.clone(), now)?;
        update = update.with_text(text);

        let title = item.text.primary_title().unwrap_or_default().to_string();
        if previous_title.as_deref() != Some(title.as_str()) {
            let slug = self
                .slug_service
                .generate_unique_slug(item.kind, &title, Some(item.id), now)
                .await?;
            item.set_slug(slug.clone(), now);
            update = update.with_slug(slug);
        }
        Ok(update)
    }
}
