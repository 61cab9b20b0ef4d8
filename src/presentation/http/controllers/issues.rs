// src/presentation/http/controllers/issues.rs
use crate::application::{
    commands::issues::{CreateIssueCommand, UpdateIssueCommand},
    dto::{IssueDetailDto, IssueDto, patch::double_option},
};
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
pub struct IssueListParams {
    #[serde(default)]
    pub include_unpublished: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_am: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_am: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueRequest {
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub title_am: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description_am: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_image: Option<Option<String>>,
    #[serde(default)]
    pub published: Option<bool>,
}

pub async fn list_issues(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    ApiQuery(params): ApiQuery<IssueListParams>,
) -> HttpResult<ApiResponse<Vec<IssueDto>>> {
    state
        .services
        .issue_queries
        .list_issues(actor.0.as_ref(), params.include_unpublished)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn get_issue(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<ApiResponse<IssueDetailDto>> {
    state
        .services
        .issue_queries
        .get_issue(actor.0.as_ref(), id)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn create_issue(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiJson(payload): ApiJson<CreateIssueRequest>,
) -> HttpResult<ApiResponse<IssueDto>> {
    let command = CreateIssueCommand {
        month: payload.month,
        year: payload.year,
        title: payload.title,
        title_am: payload.title_am,
        description: payload.description,
        description_am: payload.description_am,
        cover_image: payload.cover_image,
        published: payload.published,
    };

    state
        .services
        .issue_commands
        .create_issue(&user, command)
        .await
        .into_http()
        .map(ApiResponse::created)
}

pub async fn update_issue(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<UpdateIssueRequest>,
) -> HttpResult<ApiResponse<IssueDto>> {
    let command = UpdateIssueCommand {
        id,
        month: payload.month,
        year: payload.year,
        title: payload.title,
        title_am: payload.title_am,
        description: payload.description,
        description_am: payload.description_am,
        cover_image: payload.cover_image,
        published: payload.published,
    };

    state
        .services
        .issue_commands
        .update_issue(&user, command)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn delete_issue(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<ApiResponse<StatusMessage>> {
    state
        .services
        .issue_commands
        .delete_issue(&user, id)
        .await
        .into_http()?;

    Ok(StatusMessage::deleted())
}
