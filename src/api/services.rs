//! Service catalog API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{created, success, success_msg, ApiResult, PageData};
use crate::auth::OptionalIdentity;
use crate::db::Page;
use crate::errors::AppError;
use crate::models::service::{self};
use crate::models::{CreateServiceRequest, Service, ServiceCategory, UpdateServiceRequest};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
}

/// GET /api/services - List services. Anonymous callers only see active ones.
pub async fn list_services(
    State(state): State<AppState>,
    identity: OptionalIdentity,
    Query(query): Query<ServiceListQuery>,
) -> ApiResult<PageData<Service>> {
    let category = query
        .category
        .as_deref()
        .map(|s| {
            ServiceCategory::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown category '{}'", s)))
        })
        .transpose()?;
    let page = Page::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));

    let (services, total) = state
        .repo
        .list_services(category, !identity.can_view_hidden(), page)
        .await?;
    success(PageData::new(services, page, total))
}

/// GET /api/services/{id} - Get a single service.
pub async fn get_service(
    State(state): State<AppState>,
    identity: OptionalIdentity,
    Path(id): Path<String>,
) -> ApiResult<Service> {
    let service = state
        .repo
        .get_service(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))?;

    if !service.is_active && !identity.can_view_hidden() {
        return Err(AppError::NotFound(format!("Service {} not found", id)));
    }
    success(service)
}

/// POST /api/services - Create a service.
pub async fn create_service(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Service> {
    service::create_rules()
        .validate(&body)
        .map_err(AppError::Validation)?;
    let request: CreateServiceRequest = serde_json::from_value(body)?;

    let service = state.repo.create_service(&request).await?;
    created(service)
}

/// PUT /api/services/{id} - Update a service.
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Service> {
    service::update_rules()
        .validate(&body)
        .map_err(AppError::Validation)?;
    let request: UpdateServiceRequest = serde_json::from_value(body)?;

    let service = state.repo.update_service(&id, &request).await?;
    success(service)
}

/// DELETE /api/services/{id} - Delete a service.
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_service(&id).await?;
    success_msg((), "Service deleted")
}

/// PATCH /api/services/{id}/toggle-active - Flip the active flag.
pub async fn toggle_service_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Service> {
    let service = state.repo.toggle_service_active(&id).await?;
    success(service)
}

/// PATCH /api/services/{id}/toggle-popular - Flip the popular flag.
pub async fn toggle_service_popular(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Service> {
    let service = state.repo.toggle_service_popular(&id).await?;
    success(service)
}
