use super::ContentCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, ContentDto},
        error::ApplicationResult,
    },
    domain::content::{ContentKind, ContentUpdate},
};

pub struct SetPublishStateCommand {
    pub id: i64,
    pub publish: bool,
}

pub struct SetFeaturedCommand {
    pub id: i64,
    pub featured: bool,
}

impl ContentCommandService {
    pub async fn set_publish_state(
        &self,
        actor: &AuthenticatedUser,
        kind: ContentKind,
        command: SetPublishStateCommand,
    ) -> ApplicationResult<ContentDto> {
        ensure_capability(actor, "content", "publish")?;
        let mut item = self.load(kind, command.id).await?;
        if item.published == command.publish {
            return self.to_dto(item).await;
        }

        let original_updated_at = item.updated_at;
        let now = self.clock.now();
        if command.publish {
            item.publish(now)?;
        } else {
            item.unpublish(now);
        }

        let mut update = ContentUpdate::new(kind, item.id, original_updated_at)
            .with_publish_state(item.published, item.published_at);
        update.set_updated_at(item.updated_at);

        let updated = self.write_repo.update(update).await?;
        tracing::info!(
            kind = %kind,
            id = command.id,
            published = updated.published,
            "publish state changed"
        );
        self.announce_if_newly_published(!command.publish, &updated).await;
        self.to_dto(updated).await
    }

    pub async fn set_featured(
        &self,
        actor: &AuthenticatedUser,
        kind: ContentKind,
        command: SetFeaturedCommand,
    ) -> ApplicationResult<ContentDto> {
        ensure_capability(actor, "content", "update")?;
        let item = self.load(kind, command.id).await?;
        if item.featured == command.featured {
            return self.to_dto(item).await;
        }

        let mut update =
            ContentUpdate::new(kind, item.id, item.updated_at).with_featured(command.featured);
        update.set_updated_at(self.clock.now());
        let updated = self.write_repo.update(update).await?;
        self.to_dto(updated).await
    }
}
