//! Page content API endpoints.
//!
//! Each page domain holds a single JSON document; GET returns it and PUT
//! replaces it wholesale after validating against the domain's rules.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use super::{success, success_msg, ApiResult};
use crate::errors::AppError;
use crate::models::{ContentDocument, ContentDomain};
use crate::AppState;

fn parse_domain(s: &str) -> Result<ContentDomain, AppError> {
    ContentDomain::parse(s)
        .ok_or_else(|| AppError::NotFound(format!("Unknown content domain '{}'", s)))
}

/// GET /api/content/{domain} - Get a page's current document.
pub async fn get_page_content(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> ApiResult<ContentDocument> {
    let domain = parse_domain(&domain)?;

    match state.repo.get_page_content(domain).await? {
        Some(document) => success(document),
        None => Err(AppError::NotFound(format!(
            "No content stored for '{}'",
            domain.as_str()
        ))),
    }
}

/// PUT /api/content/{domain} - Replace a page's document.
pub async fn update_page_content(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<ContentDocument> {
    let domain = parse_domain(&domain)?;
    domain.rules().validate(&body).map_err(AppError::Validation)?;

    let document = state.repo.upsert_page_content(domain, &body).await?;
    success_msg(document, "Content updated")
}
