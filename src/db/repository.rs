//! Repository root: shared state, helpers, and page-content operations.
//!
//! Per-domain CRUD lives in sibling modules, all as `impl Repository`
//! blocks over the same pool.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{ContentDocument, ContentDomain};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pub(crate) pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Current timestamp in the stored RFC 3339 format.
pub(crate) fn now() -> String {
    Utc::now().to_rfc3339()
}

pub(crate) fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

// ==================== PAGE CONTENT OPERATIONS ====================

impl Repository {
    /// Get a page domain's current document.
    pub async fn get_page_content(
        &self,
        domain: ContentDomain,
    ) -> Result<Option<ContentDocument>, AppError> {
        let row = sqlx::query(
            "SELECT id, domain, body, created_at, updated_at FROM content_documents WHERE domain = ?",
        )
        .bind(domain.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| content_from_row(&row)).transpose()
    }

    /// Replace (or create) a page domain's document body. The id and
    /// creation timestamp survive replacement.
    pub async fn upsert_page_content(
        &self,
        domain: ContentDomain,
        body: &serde_json::Value,
    ) -> Result<ContentDocument, AppError> {
        let body_json = serde_json::to_string(body)
            .map_err(|e| AppError::Internal(format!("Failed to serialize body: {}", e)))?;
        let now = now();

        if let Some(existing) = self.get_page_content(domain).await? {
            sqlx::query("UPDATE content_documents SET body = ?, updated_at = ? WHERE domain = ?")
                .bind(&body_json)
                .bind(&now)
                .bind(domain.as_str())
                .execute(&self.pool)
                .await?;

            Ok(ContentDocument {
                id: existing.id,
                domain,
                body: body.clone(),
                created_at: existing.created_at,
                updated_at: now,
            })
        } else {
            let id = uuid::Uuid::new_v4().to_string();
            sqlx::query(
                "INSERT INTO content_documents (id, domain, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(domain.as_str())
            .bind(&body_json)
            .bind(&now)
            .bind(&now)
            .execute(&self.pool)
            .await?;

            Ok(ContentDocument {
                id,
                domain,
                body: body.clone(),
                created_at: now.clone(),
                updated_at: now,
            })
        }
    }
}

fn content_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<ContentDocument, AppError> {
    let domain_str: String = row.get("domain");
    let domain = ContentDomain::parse(&domain_str)
        .ok_or_else(|| AppError::Internal(format!("Unknown content domain '{}'", domain_str)))?;
    let body_str: String = row.get("body");
    let body = serde_json::from_str(&body_str)
        .map_err(|e| AppError::Internal(format!("Corrupt content body: {}", e)))?;

    Ok(ContentDocument {
        id: row.get("id"),
        domain,
        body,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
