use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::content::repository::ContentReadRepository;
use crate::domain::content::value_objects::{ContentId, ContentKind, Slug};
use crate::domain::errors::DomainResult;

pub trait SlugGenerator: Send + Sync {
    /// Must be idempotent: slugifying an already generated slug returns it
    /// unchanged.
    fn slugify(&self, input: &str) -> String;
}

/// Produces slugs that are unique within one content kind.
pub struct ContentSlugService {
    read_repo: Arc<dyn ContentReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl ContentSlugService {
    pub fn new(
        read_repo: Arc<dyn ContentReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    pub fn generator(&self) -> &dyn SlugGenerator {
        self.generator.as_ref()
    }

    pub async fn generate_unique_slug(
        &self,
        kind: ContentKind,
        source: &str,
        ignore_id: Option<ContentId>,
        now: DateTime<Utc>,
    ) -> DomainResult<Slug> {
        let base = self.generator.slugify(source);
        let base_slug = if base.is_empty() {
            format!("{}-{}", kind.as_str(), now.timestamp())
        } else {
            base
        };

        let mut candidate = base_slug.clone();
        let mut counter = 1u64;

        loop {
            let slug = Slug::new(candidate.clone())?;
            match self.read_repo.find_by_slug(kind, &slug).await? {
                Some(existing) if ignore_id.is_some_and(|id| id == existing.id) => {
                    return Ok(slug);
                }
                Some(_) => {
                    candidate = format!("{base_slug}-{counter}");
                    counter += 1;
                }
                None => return Ok(slug),
            }
        }
    }
}
