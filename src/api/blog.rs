//! Blog post API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{created, success, success_msg, ApiResult, PageData};
use crate::auth::OptionalIdentity;
use crate::db::{BlogFilter, Page};
use crate::errors::AppError;
use crate::models::blog::{self, slugify};
use crate::models::{BlogCategory, BlogPost, BlogStatus, CreateBlogPostRequest, UpdateBlogPostRequest};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// GET /api/blog - List posts. Anonymous callers only see published posts.
pub async fn list_blog_posts(
    State(state): State<AppState>,
    identity: OptionalIdentity,
    Query(query): Query<BlogListQuery>,
) -> ApiResult<PageData<BlogPost>> {
    let status = if identity.can_view_hidden() {
        query
            .status
            .as_deref()
            .map(|s| {
                BlogStatus::parse(s)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{}'", s)))
            })
            .transpose()?
    } else {
        Some(BlogStatus::Published)
    };
    let category = query
        .category
        .as_deref()
        .map(|s| {
            BlogCategory::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown category '{}'", s)))
        })
        .transpose()?;

    let filter = BlogFilter {
        status,
        category,
        search: query.search,
    };
    let page = Page::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));

    let (posts, total) = state.repo.list_posts(&filter, page).await?;
    success(PageData::new(posts, page, total))
}

/// GET /api/blog/{idOrSlug} - Get a single post by id, falling back to slug.
pub async fn get_blog_post(
    State(state): State<AppState>,
    identity: OptionalIdentity,
    Path(id_or_slug): Path<String>,
) -> ApiResult<BlogPost> {
    let post = match state.repo.get_post(&id_or_slug).await? {
        Some(post) => post,
        None => state
            .repo
            .get_post_by_slug(&id_or_slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post '{}' not found", id_or_slug)))?,
    };

    // Unpublished posts are invisible to anonymous callers
    if post.status != BlogStatus::Published && !identity.can_view_hidden() {
        return Err(AppError::NotFound(format!(
            "Blog post '{}' not found",
            id_or_slug
        )));
    }
    success(post)
}

/// POST /api/blog - Create a post.
pub async fn create_blog_post(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<BlogPost> {
    blog::create_rules()
        .validate(&body)
        .map_err(AppError::Validation)?;
    let request: CreateBlogPostRequest = serde_json::from_value(body)?;

    // Pre-check the slug the insert will use; the unique index backs this up
    let slug = match &request.slug {
        Some(s) if !s.trim().is_empty() => s.clone(),
        _ => slugify(&request.title),
    };
    if state.repo.get_post_by_slug(&slug).await?.is_some() {
        return Err(AppError::Conflict {
            field: "slug".to_string(),
            message: format!("A post with slug '{}' already exists", slug),
        });
    }

    let post = state.repo.create_post(&request).await?;
    created(post)
}

/// PUT /api/blog/{id} - Update a post.
pub async fn update_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<BlogPost> {
    blog::update_rules()
        .validate(&body)
        .map_err(AppError::Validation)?;
    let request: UpdateBlogPostRequest = serde_json::from_value(body)?;

    let existing = state
        .repo
        .get_post(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog post {} not found", id)))?;

    if let Some(to) = request.status {
        if !existing.status.can_transition(to) {
            return Err(AppError::Conflict {
                field: "status".to_string(),
                message: format!(
                    "Cannot change status from '{}' to '{}'",
                    existing.status.as_str(),
                    to.as_str()
                ),
            });
        }
    }

    if let Some(slug) = &request.slug {
        if slug != &existing.slug {
            if state.repo.get_post_by_slug(slug).await?.is_some() {
                return Err(AppError::Conflict {
                    field: "slug".to_string(),
                    message: format!("A post with slug '{}' already exists", slug),
                });
            }
        }
    }

    let post = state.repo.update_post(&id, &request).await?;
    success(post)
}

/// DELETE /api/blog/{id} - Delete a post.
pub async fn delete_blog_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_post(&id).await?;
    success_msg((), "Blog post deleted")
}

/// PATCH /api/blog/{id}/toggle-featured - Flip the featured flag.
pub async fn toggle_blog_post_featured(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<BlogPost> {
    let post = state.repo.toggle_post_featured(&id).await?;
    success(post)
}
