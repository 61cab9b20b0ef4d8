// src/presentation/http/controllers/settings.rs
use crate::application::{commands::settings::SetSettingCommand, dto::SettingDto};
use crate::domain::settings::SettingType;
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::{ApiJson, Authenticated},
    response::{ApiResponse, StatusMessage},
    state::HttpState,
};
use axum::{Extension, extract::Path};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct SetSettingRequest {
    pub value: Value,
    #[serde(rename = "type")]
    pub kind: SettingType,
}

pub async fn list_settings(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<ApiResponse<Vec<SettingDto>>> {
    state
        .services
        .settings_queries
        .list_settings(&user)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn get_setting(
    Extension(state): Extension<HttpState>,
    Path(key): Path<String>,
) -> HttpResult<ApiResponse<SettingDto>> {
    state
        .services
        .settings_queries
        .get_setting(&key)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn set_setting(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(key): Path<String>,
    ApiJson(payload): ApiJson<SetSettingRequest>,
) -> HttpResult<ApiResponse<SettingDto>> {
    let command = SetSettingCommand {
        key,
        value: payload.value,
        kind: payload.kind,
    };

    state
        .services
        .settings_commands
        .set_setting(&user, command)
        .await
        .into_http()
        .map(ApiResponse::ok)
}

pub async fn delete_setting(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(key): Path<String>,
) -> HttpResult<ApiResponse<StatusMessage>> {
    state
        .services
        .settings_commands
        .delete_setting(&user, &key)
        .await
        .into_http()?;

    Ok(StatusMessage::deleted())
}
