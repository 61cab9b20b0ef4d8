// src/presentation/http/controllers/hero.rs
use crate::application::dto::{HeroCategoryDto, HeroVideoDto};
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::{ApiJson, Authenticated},
    response::ApiResponse,
    state::HttpState,
};
use axum::Extension;

pub async fn get_video(
    Extension(state): Extension<HttpState>,
) -> HttpResult<ApiResponse<Option<HeroVideoDto>>> {
    state
        .services
        .settings_queries
        .hero_video()
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn set_video(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiJson(video): ApiJson<HeroVideoDto>,
) -> HttpResult<ApiResponse<HeroVideoDto>> {
    state
        .services
        .settings_commands
        .set_hero_video(&user, video)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn get_categories(
    Extension(state): Extension<HttpState>,
) -> HttpResult<ApiResponse<Vec<HeroCategoryDto>>> {
    state
        .services
        .settings_queries
        .hero_categories()
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn set_categories(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiJson(categories): ApiJson<Vec<HeroCategoryDto>>,
) -> HttpResult<ApiResponse<Vec<HeroCategoryDto>>> {
    state
        .services
        .settings_commands
        .set_hero_categories(&user, categories)
        .await
        .into_http()
        .map(ApiResponse::ok)
}
