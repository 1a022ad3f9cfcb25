//! EduConsult Backend
//!
//! REST backend for an education-consultancy marketing site: ten content
//! domains over SQLite, declarative validation, and role-guarded mutation.
//! The [`client`] module carries the typed API client used by the editing
//! and rendering surfaces.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod notify;
pub mod validation;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use auth::{ADMIN_ONLY, ADMIN_STAFF, COUNSELING_TEAM};
use config::Config;
use db::Repository;
use notify::Notifier;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
    pub notifier: Notifier,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // One clonable guard layer per allowed-role set; applied per method so
    // public reads and guarded writes can share a path
    let secret = state.config.jwt_secret.clone();
    let admin = {
        let secret = secret.clone();
        middleware::from_fn(move |req, next| {
            auth::require_role(secret.clone(), ADMIN_ONLY, req, next)
        })
    };
    let staff = {
        let secret = secret.clone();
        middleware::from_fn(move |req, next| {
            auth::require_role(secret.clone(), ADMIN_STAFF, req, next)
        })
    };
    let counseling = {
        let secret = secret.clone();
        middleware::from_fn(move |req, next| {
            auth::require_role(secret.clone(), COUNSELING_TEAM, req, next)
        })
    };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        // Page content
        .route(
            "/content/{domain}",
            get(api::get_page_content)
                .merge(put(api::update_page_content).layer(admin.clone())),
        )
        // Blog
        .route(
            "/blog",
            get(api::list_blog_posts).merge(post(api::create_blog_post).layer(admin.clone())),
        )
        .route(
            "/blog/{id}",
            get(api::get_blog_post).merge(
                put(api::update_blog_post)
                    .delete(api::delete_blog_post)
                    .layer(admin.clone()),
            ),
        )
        .route(
            "/blog/{id}/toggle-featured",
            patch(api::toggle_blog_post_featured).layer(admin.clone()),
        )
        // Services
        .route(
            "/services",
            get(api::list_services).merge(post(api::create_service).layer(admin.clone())),
        )
        .route(
            "/services/{id}",
            get(api::get_service).merge(
                put(api::update_service)
                    .delete(api::delete_service)
                    .layer(admin.clone()),
            ),
        )
        .route(
            "/services/{id}/toggle-active",
            patch(api::toggle_service_active).layer(admin.clone()),
        )
        .route(
            "/services/{id}/toggle-popular",
            patch(api::toggle_service_popular).layer(admin.clone()),
        )
        // Team
        .route(
            "/team",
            get(api::list_team_members).merge(post(api::create_team_member).layer(admin.clone())),
        )
        .route(
            "/team/{id}",
            get(api::get_team_member).merge(
                put(api::update_team_member)
                    .delete(api::delete_team_member)
                    .layer(admin.clone()),
            ),
        )
        .route(
            "/team/{id}/toggle-active",
            patch(api::toggle_team_member_active).layer(admin.clone()),
        )
        .route(
            "/team/{id}/toggle-visible",
            patch(api::toggle_team_member_visible).layer(admin.clone()),
        )
        // Contact: public form post, staff triage, admin delete
        .route(
            "/contact",
            post(api::create_contact_submission)
                .merge(get(api::list_contact_submissions).layer(staff.clone())),
        )
        .route(
            "/contact/{id}",
            get(api::get_contact_submission)
                .put(api::update_contact_submission)
                .layer(staff)
                .merge(delete(api::delete_contact_submission).layer(admin.clone())),
        )
        // Consultations: public booking, counseling-team workflow, admin delete
        .route(
            "/consultations",
            post(api::create_consultation)
                .merge(get(api::list_consultations).layer(counseling.clone())),
        )
        .route(
            "/consultations/{id}",
            get(api::get_consultation)
                .put(api::update_consultation)
                .layer(counseling)
                .merge(delete(api::delete_consultation).layer(admin.clone())),
        )
        // Uploads: the route body limit sits above the handler's cap so the
        // handler's own size check produces the error the client sees
        .route(
            "/uploads",
            post(api::upload_image)
                .layer::<_, std::convert::Infallible>(admin.clone())
                .layer(DefaultBodyLimit::max(api::MAX_FILE_SIZE + 1024 * 1024)),
        )
        .route(
            "/uploads/{filename}",
            delete(api::delete_upload).layer(admin),
        );

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.uploads_path))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "EduConsult backend is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.config.environment,
    }))
}

#[cfg(test)]
mod tests;
