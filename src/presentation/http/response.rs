// src/presentation/http/response.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

#[derive(Serialize)]
struct SuccessBody<T> {
    success: bool,
    data: T,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = SuccessBody {
            success: true,
            data: self.data,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Body for endpoints that only confirm an action.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: &'static str,
}

impl StatusMessage {
    pub fn deleted() -> ApiResponse<Self> {
        ApiResponse::ok(Self { status: "deleted" })
    }
}
