use super::{ContentQueryService, list::normalize_limit};
use crate::{
    application::{
        dto::SearchResultsDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        content::{ContentFilter, ContentKind, StatusFilter},
        errors::non_blank,
    },
};

pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<u32>,
}

impl ContentQueryService {
    /// Searches published articles and poems in both languages.
    pub async fn search(&self, query: SearchQuery) -> ApplicationResult<SearchResultsDto> {
        let term = non_blank(query.q)
            .ok_or_else(|| ApplicationError::validation("search query is required"))?;
        let filter = ContentFilter {
            status: StatusFilter::Published,
            search: Some(term.clone()),
            limit: normalize_limit(query.limit),
            ..ContentFilter::default()
        };

        let articles = self.read_repo.list(ContentKind::Article, &filter).await?;
        let poems = self.read_repo.list(ContentKind::Poem, &filter).await?;
        let articles = self.with_authors(articles).await?;
        let poems = self.with_authors(poems).await?;

        Ok(SearchResultsDto {
            query: term,
            total: articles.len() + poems.len(),
            articles,
            poems,
        })
    }
}
