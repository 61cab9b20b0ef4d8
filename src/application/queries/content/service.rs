use std::{collections::HashMap, sync::Arc};

use crate::{
    application::{
        dto::{AuthenticatedUser, ContentDto},
        error::ApplicationResult,
    },
    domain::{
        content::{ContentItem, ContentReadRepository},
        user::{User, UserId, UserRepository},
    },
};

pub struct ContentQueryService {
    pub(super) read_repo: Arc<dyn ContentReadRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
}

impl ContentQueryService {
    pub fn new(
        read_repo: Arc<dyn ContentReadRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            read_repo,
            user_repo,
        }
    }

    pub(super) fn can_view_drafts(actor: Option<&AuthenticatedUser>) -> bool {
        actor.is_some_and(|a| a.has_capability("content", "view_drafts"))
    }

    /// Converts items to DTOs with their author embedded, loading each
    /// distinct author once.
    pub async fn with_authors(&self, items: Vec<ContentItem>) -> ApplicationResult<Vec<ContentDto>> {
        let mut authors: HashMap<UserId, Option<User>> = HashMap::new();
        let mut dtos = Vec::with_capacity(items.len());
        for item in items {
            if !authors.contains_key(&item.author_id) {
                let user = self.user_repo.find_by_id(item.author_id).await?;
                authors.insert(item.author_id, user);
            }
            let author = authors.get(&item.author_id).and_then(Option::as_ref);
            dtos.push(ContentDto::from(item).with_author(author));
        }
        Ok(dtos)
    }
}
