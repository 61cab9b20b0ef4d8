use super::ContentCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, ContentDto},
        editor::ContentDraft,
        error::ApplicationResult,
    },
    domain::content::{ContentKind, NewContent},
};

pub struct CreateContentCommand {
    pub kind: ContentKind,
    pub draft: ContentDraft,
}

impl ContentCommandService {
    pub async fn create_content(
        &self,
        actor: &AuthenticatedUser,
        command: CreateContentCommand,
    ) -> ApplicationResult<ContentDto> {
        ensure_capability(actor, "content", "create")?;
        let kind = command.kind;
        let submission = command.draft.validate()?;
        if submission.published {
            ensure_capability(actor, "content", "publish")?;
            submission.text.ensure_publishable()?;
        }
        submission.text.ensure_not_empty()?;

        let author_id = self.resolve_author(actor, submission.author).await?;
        let issue_id = self.resolve_issue(submission.issue_id).await?;
        let now = self.clock.now();
        let slug = self
            .slug_service
            .generate_unique_slug(
                kind,
                submission.text.primary_title().unwrap_or_default(),
                None,
                now,
            )
            .await?;

        let new_content = NewContent {
            kind,
            slug,
            text: submission.text,
            category: submission.category,
            tags: submission.tags,
            cover_image: submission.cover_image,
            published: submission.published,
            featured: submission.featured,
            published_at: submission.published.then_some(now),
            author_id,
            issue_id,
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(new_content).await?;
        tracing::info!(kind = %kind, id = created.id.0, slug = %created.slug, "content created");
        self.announce_if_newly_published(false, &created).await;
        self.to_dto(created).await
    }
}
