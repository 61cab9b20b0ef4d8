// src/presentation/http/controllers/submissions.rs
use crate::application::{commands::inbox::SubmitWorkCommand, dto::SubmissionDto};
use crate::domain::{
    content::{ContentKind, Language},
    inbox::SubmissionStatus,
};
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::{ApiJson, ApiQuery, Authenticated, ClientIp},
    middleware::rate_limit::check_form_limit,
    response::ApiResponse,
    state::HttpState,
};
use axum::{Extension, extract::Path};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmissionListParams {
    #[serde(default)]
    pub status: Option<SubmissionStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: SubmissionStatus,
}

pub async fn submit(
    Extension(state): Extension<HttpState>,
    ip: ClientIp,
    ApiJson(payload): ApiJson<SubmitRequest>,
) -> HttpResult<ApiResponse<SubmissionDto>> {
    check_form_limit(&state, &ip, "submissions")?;
    let command = SubmitWorkCommand {
        name: payload.name,
        email: payload.email,
        kind: payload.kind,
        title: payload.title,
        content: payload.content,
        language: payload.language,
    };

    state
        .services
        .inbox_commands
        .submit_work(command)
        .await
        .into_http()
        .map(ApiResponse::created)
}

pub async fn list_submissions(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiQuery(params): ApiQuery<SubmissionListParams>,
) -> HttpResult<ApiResponse<Vec<SubmissionDto>>> {
    state
        .services
        .inbox_queries
        .list_submissions(&user, params.status)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn review_submission(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ReviewRequest>,
) -> HttpResult<ApiResponse<SubmissionDto>> {
    state
        .services
        .inbox_commands
        .review_submission(&user, id, payload.status)
        .await
        .into_http()
        .map(ApiResponse::ok)
}
