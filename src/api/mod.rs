//! REST API module.
//!
//! Contains all API routes and handlers following the client contract:
//! every body is a `{ success, data, message? }` envelope, and list
//! endpoints wrap their items with pagination metadata.

mod blog;
mod consultations;
mod contacts;
mod content;
mod services;
mod team;
mod uploads;

pub use blog::*;
pub use consultations::*;
pub use contacts::*;
pub use content::*;
pub use services::*;
pub use team::*;
pub use uploads::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    pub status: StatusCode,
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;

/// 200 OK envelope.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse {
        status: StatusCode::OK,
        success: true,
        data,
        message: None,
    })
}

/// 200 OK envelope with a human-readable message.
pub fn success_msg<T: Serialize>(data: T, message: impl Into<String>) -> ApiResult<T> {
    Ok(ApiResponse {
        status: StatusCode::OK,
        success: true,
        data,
        message: Some(message.into()),
    })
}

/// 201 Created envelope.
pub fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse {
        status: StatusCode::CREATED,
        success: true,
        data,
        message: None,
    })
}

/// Pagination metadata for list responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: i64,
    pub pages: i64,
    pub total: i64,
}

/// A page of items plus its pagination metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T: Serialize> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> PageData<T> {
    pub fn new(items: Vec<T>, page: crate::db::Page, total: i64) -> Self {
        Self {
            items,
            pagination: Pagination {
                current: page.page,
                pages: page.pages_for(total),
                total,
            },
        }
    }
}
