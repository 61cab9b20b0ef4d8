use super::ContentQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, ContentDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::{ContentId, ContentItem, ContentKind, Slug},
};

pub struct GetContentQuery {
    /// Numeric id or slug.
    pub key: String,
}

impl ContentQueryService {
    pub async fn get_content(
        &self,
        actor: Option<&AuthenticatedUser>,
        kind: ContentKind,
        query: GetContentQuery,
    ) -> ApplicationResult<ContentDto> {
        let key = query.key.trim();
        // Titles such as "1984" yield all-digit slugs, so a numeric key that
        // misses as an id is retried as a slug.
        let by_id = match key.parse::<i64>().ok().and_then(|id| ContentId::new(id).ok()) {
            Some(id) => self.read_repo.find_by_id(kind, id).await?,
            None => None,
        };
        let found = match by_id {
            Some(item) => Some(item),
            None => self.read_repo.find_by_slug(kind, &Slug::new(key)?).await?,
        };
        let item = found.ok_or_else(|| ApplicationError::not_found(format!("{kind} not found")))?;
        Self::ensure_visible(actor, &item)?;

        let mut dtos = self.with_authors(vec![item]).await?;
        dtos.pop()
            .ok_or_else(|| ApplicationError::not_found(format!("{kind} not found")))
    }

    /// Drafts are reported as missing unless the caller may see drafts or
    /// wrote the item.
    fn ensure_visible(actor: Option<&AuthenticatedUser>, item: &ContentItem) -> ApplicationResult<()> {
        if item.published
            || Self::can_view_drafts(actor)
            || actor.is_some_and(|a| a.id == item.author_id)
        {
            Ok(())
        } else {
            Err(ApplicationError::not_found(format!("{} not found", item.kind)))
        }
    }
}
