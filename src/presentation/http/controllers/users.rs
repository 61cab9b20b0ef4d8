// src/presentation/http/controllers/users.rs
use crate::application::{
    commands::users::{CreateUserCommand, ResolveAuthorCommand, UpdateUserCommand},
    dto::{UserDto, patch::double_option},
    queries::users::ListUsersQuery,
};
use crate::domain::user::Role;
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::{ApiJson, ApiQuery, Authenticated, MaybeAuthenticated},
    response::{ApiResponse, StatusMessage},
    state::HttpState,
};
use axum::{Extension, extract::Path};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListUsersParams {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveAuthorRequest {
    pub name: String,
}

pub async fn list_users(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiQuery(params): ApiQuery<ListUsersParams>,
) -> HttpResult<ApiResponse<Vec<UserDto>>> {
    state
        .services
        .user_queries
        .list_users(&user, ListUsersQuery { q: params.q })
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn create_user(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> HttpResult<ApiResponse<UserDto>> {
    let command = CreateUserCommand {
        name: payload.name,
        email: payload.email,
        password: payload.password,
        role: payload.role,
        bio: payload.bio,
    };

    state
        .services
        .user_commands
        .create_user(actor.0.as_ref(), command)
        .await
        .into_http()
        .map(ApiResponse::created)
}

pub async fn get_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<ApiResponse<UserDto>> {
    state
        .services
        .user_queries
        .get_user(&user, id)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn update_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> HttpResult<ApiResponse<UserDto>> {
    let command = UpdateUserCommand {
        user_id: id,
        name: payload.name,
        email: payload.email,
        role: payload.role,
        bio: payload.bio,
        password: payload.password,
    };

    state
        .services
        .user_commands
        .update_user(&user, command)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn delete_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<ApiResponse<StatusMessage>> {
    state
        .services
        .user_commands
        .delete_user(&user, id)
        .await
        .into_http()?;

    Ok(StatusMessage::deleted())
}

pub async fn resolve_author(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiJson(payload): ApiJson<ResolveAuthorRequest>,
) -> HttpResult<ApiResponse<UserDto>> {
    state
        .services
        .user_commands
        .resolve_author(&user, ResolveAuthorCommand { name: payload.name })
        .await
        .into_http()
        .map(ApiResponse::ok)
}
