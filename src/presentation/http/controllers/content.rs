// src/presentation/http/controllers/content.rs
//! Handlers shared by `/api/articles` and `/api/poems`. The router nests
//! them once per kind and passes the kind as an extension.
use crate::application::{
    commands::content::{
        CreateContentCommand, RecordEngagementCommand, SetFeaturedCommand,
        SetPublishStateCommand, UpdateContentCommand,
    },
    dto::{ContentDto, ContentPageDto, CounterDto, patch::double_option},
    editor::{ContentDraft, TagsInput, TextPatch},
    queries::content::{GetContentQuery, ListContentQuery},
};
use crate::domain::content::{ContentKind, Counter};
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::{ApiJson, ApiQuery, Authenticated, MaybeAuthenticated},
    response::{ApiResponse, StatusMessage},
    state::HttpState,
};
use axum::{Extension, extract::Path};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentListParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub issue_id: Option<i64>,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub skip: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentRequest {
    #[serde(flatten)]
    pub text: TextPatch,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<TagsInput>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_image: Option<Option<String>>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub issue_id: Option<Option<i64>>,
}

fn yes() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    #[serde(default = "yes")]
    pub published: bool,
}

#[derive(Debug, Deserialize)]
pub struct FeatureRequest {
    #[serde(default = "yes")]
    pub featured: bool,
}

pub async fn list_content(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    actor: MaybeAuthenticated,
    ApiQuery(params): ApiQuery<ContentListParams>,
) -> HttpResult<ApiResponse<ContentPageDto>> {
    let query = ListContentQuery {
        status: params.status,
        category: params.category,
        featured: params.featured,
        issue_id: params.issue_id,
        author_id: params.author_id,
        search: params.q.or(params.search),
        limit: params.limit,
        skip: params.skip,
    };

    state
        .services
        .content_queries
        .list_content(actor.0.as_ref(), kind, query)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn get_content(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    actor: MaybeAuthenticated,
    Path(key): Path<String>,
) -> HttpResult<ApiResponse<ContentDto>> {
    state
        .services
        .content_queries
        .get_content(actor.0.as_ref(), kind, GetContentQuery { key })
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn create_content(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Authenticated(user): Authenticated,
    ApiJson(draft): ApiJson<ContentDraft>,
) -> HttpResult<ApiResponse<ContentDto>> {
    state
        .services
        .content_commands
        .create_content(&user, CreateContentCommand { kind, draft })
        .await
        .into_http()
        .map(ApiResponse::created)
}

pub async fn update_content(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<UpdateContentRequest>,
) -> HttpResult<ApiResponse<ContentDto>> {
    let command = UpdateContentCommand {
        id,
        text: payload.text,
        category: payload.category,
        tags: payload.tags,
        cover_image: payload.cover_image,
        featured: payload.featured,
        published: payload.published,
        author_id: payload.author_id,
        author_name: payload.author_name,
        issue_id: payload.issue_id,
    };

    state
        .services
        .content_commands
        .update_content(&user, kind, command)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn delete_content(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<ApiResponse<StatusMessage>> {
    state
        .services
        .content_commands
        .delete_content(&user, kind, id)
        .await
        .into_http()?;

    Ok(StatusMessage::deleted())
}

pub async fn set_publish_state(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<PublishRequest>,
) -> HttpResult<ApiResponse<ContentDto>> {
    let command = SetPublishStateCommand {
        id,
        publish: payload.published,
    };

    state
        .services
        .content_commands
        .set_publish_state(&user, kind, command)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn set_featured(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<FeatureRequest>,
) -> HttpResult<ApiResponse<ContentDto>> {
    let command = SetFeaturedCommand {
        id,
        featured: payload.featured,
    };

    state
        .services
        .content_commands
        .set_featured(&user, kind, command)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

async fn record(
    state: HttpState,
    kind: ContentKind,
    id: i64,
    counter: Counter,
) -> HttpResult<ApiResponse<CounterDto>> {
    state
        .services
        .content_commands
        .record_engagement(RecordEngagementCommand { kind, id, counter })
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn record_view(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<i64>,
) -> HttpResult<ApiResponse<CounterDto>> {
    record(state, kind, id, Counter::Views).await
}

pub async fn record_like(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<i64>,
) -> HttpResult<ApiResponse<CounterDto>> {
    record(state, kind, id, Counter::Likes).await
}

pub async fn record_share(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<ContentKind>,
    Path(id): Path<i64>,
) -> HttpResult<ApiResponse<CounterDto>> {
    record(state, kind, id, Counter::Shares).await
}
