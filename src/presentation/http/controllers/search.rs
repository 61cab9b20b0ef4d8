// src/presentation/http/controllers/search.rs
use crate::application::{dto::SearchResultsDto, queries::content::SearchQuery};
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::ApiQuery,
    response::ApiResponse,
    state::HttpState,
};
use axum::Extension;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

pub async fn search(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> HttpResult<ApiResponse<SearchResultsDto>> {
    let query = SearchQuery {
        q: params.q.or(params.search),
        limit: params.limit,
    };

    state
        .services
        .content_queries
        .search(query)
        .await
        .into_http()
        .map(ApiResponse::ok)
}
