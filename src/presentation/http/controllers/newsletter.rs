// src/presentation/http/controllers/newsletter.rs
use crate::application::{
    commands::newsletter::SubscribeCommand,
    dto::{DigestReportDto, SubscriptionDto},
};
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::{ApiJson, ApiQuery, Authenticated, ClientIp},
    middleware::rate_limit::check_form_limit,
    response::ApiResponse,
    state::HttpState,
};
use axum::Extension;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UnsubscribeParams {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubscriberListParams {
    #[serde(default)]
    pub active: bool,
}

pub async fn subscribe(
    Extension(state): Extension<HttpState>,
    ip: ClientIp,
    ApiJson(payload): ApiJson<SubscribeRequest>,
) -> HttpResult<ApiResponse<SubscriptionDto>> {
    check_form_limit(&state, &ip, "newsletter")?;
    let command = SubscribeCommand {
        email: payload.email,
        name: payload.name,
    };

    state
        .services
        .newsletter_commands
        .subscribe(command)
        .await
        .into_http()
        .map(ApiResponse::created)
}

pub async fn unsubscribe(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<UnsubscribeParams>,
) -> HttpResult<ApiResponse<SubscriptionDto>> {
    state
        .services
        .newsletter_commands
        .unsubscribe(&params.token)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn list_subscribers(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiQuery(params): ApiQuery<SubscriberListParams>,
) -> HttpResult<ApiResponse<Vec<SubscriptionDto>>> {
    state
        .services
        .newsletter_queries
        .list_subscribers(&user, params.active)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn send_digest(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<ApiResponse<DigestReportDto>> {
    state
        .services
        .newsletter_commands
        .send_digest(&user)
        .await
        .into_http()
        .map(ApiResponse::ok)
}
