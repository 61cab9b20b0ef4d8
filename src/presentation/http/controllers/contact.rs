// src/presentation/http/controllers/contact.rs
use crate::application::{commands::inbox::SendContactMessageCommand, dto::ContactMessageDto};
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::{ApiJson, Authenticated, ClientIp},
    middleware::rate_limit::check_form_limit,
    response::ApiResponse,
    state::HttpState,
};
use axum::{Extension, extract::Path};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

pub async fn send_message(
    Extension(state): Extension<HttpState>,
    ip: ClientIp,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> HttpResult<ApiResponse<ContactMessageDto>> {
    check_form_limit(&state, &ip, "contact")?;
    let command = SendContactMessageCommand {
        name: payload.name,
        email: payload.email,
        subject: payload.subject,
        message: payload.message,
    };

    state
        .services
        .inbox_commands
        .send_contact_message(command)
        .await
        .into_http()
        .map(ApiResponse::created)
}

pub async fn list_messages(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<ApiResponse<Vec<ContactMessageDto>>> {
    state
        .services
        .inbox_queries
        .list_messages(&user)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn mark_read(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<ApiResponse<ContactMessageDto>> {
    state
        .services
        .inbox_commands
        .mark_read(&user, id)
        .await
        .into_http()
        .map(ApiResponse::ok)
}
