// src/presentation/http/controllers/comments.rs
use crate::application::{
    commands::comments::PostCommentCommand,
    dto::CommentDto,
    error::ApplicationError,
};
use crate::domain::{comment::CommentStatus, content::ContentKind};
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::{ApiJson, ApiQuery, Authenticated, ClientIp, MaybeAuthenticated},
    middleware::rate_limit::check_form_limit,
    response::{ApiResponse, StatusMessage},
    state::HttpState,
};
use axum::{
    Extension,
    extract::Path,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListParams {
    #[serde(default)]
    pub content_type: Option<ContentKind>,
    #[serde(default)]
    pub content_id: Option<i64>,
    #[serde(default)]
    pub status: Option<CommentStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentRequest {
    pub content_type: ContentKind,
    pub content_id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub author_name: String,
    #[serde(default)]
    pub author_email: Option<String>,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct ModerateRequest {
    pub status: CommentStatus,
}

/// Readers get the approved thread of one item. A `status` filter, or no
/// target at all, switches to the flat moderation list.
pub async fn list_comments(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    ApiQuery(params): ApiQuery<CommentListParams>,
) -> HttpResult<Response> {
    let target = params.content_type.zip(params.content_id);

    if params.status.is_none() {
        if let Some((kind, content_id)) = target {
            let thread = state
                .services
                .comment_queries
                .thread(kind, content_id)
                .await
                .into_http()?;
            return Ok(ApiResponse::ok(thread).into_response());
        }
    }

    let Some(user) = actor.0 else {
        return Err(HttpError::from_error(ApplicationError::unauthorized(
            "contentType and contentId are required",
        )));
    };
    let comments = state
        .services
        .comment_queries
        .list_for_moderation(&user, target, params.status)
        .await
        .into_http()?;
    Ok(ApiResponse::ok(comments).into_response())
}

pub async fn post_comment(
    Extension(state): Extension<HttpState>,
    ip: ClientIp,
    ApiJson(payload): ApiJson<PostCommentRequest>,
) -> HttpResult<ApiResponse<CommentDto>> {
    check_form_limit(&state, &ip, "comments")?;
    let command = PostCommentCommand {
        content_type: payload.content_type,
        content_id: payload.content_id,
        parent_id: payload.parent_id,
        author_name: payload.author_name,
        author_email: payload.author_email,
        body: payload.body,
    };

    state
        .services
        .comment_commands
        .post_comment(command)
        .await
        .into_http()
        .map(ApiResponse::created)
}

pub async fn moderate_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ModerateRequest>,
) -> HttpResult<ApiResponse<CommentDto>> {
    state
        .services
        .comment_commands
        .moderate(&user, id, payload.status)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn delete_comment(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<ApiResponse<StatusMessage>> {
    state
        .services
        .comment_commands
        .delete_comment(&user, id)
        .await
        .into_http()?;

    Ok(StatusMessage::deleted())
}
