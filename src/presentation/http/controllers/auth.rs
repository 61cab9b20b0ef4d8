// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::users::LoginCommand,
    dto::{LoginResponseDto, UserProfileDto},
};
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::{ApiJson, Authenticated},
    response::ApiResponse,
    state::HttpState,
};
use axum::Extension;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    Extension(state): Extension<HttpState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> HttpResult<ApiResponse<LoginResponseDto>> {
    let command = LoginCommand {
        email: payload.email,
        password: payload.password,
    };

    state
        .services
        .user_commands
        .login(command)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn profile(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<ApiResponse<UserProfileDto>> {
    state
        .services
        .user_queries
        .get_profile(&user)
        .await
        .into_http()
        .map(ApiResponse::ok)
}
