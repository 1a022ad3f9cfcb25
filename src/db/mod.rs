//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for all content domains; one table per
//! domain, plus a shared table for the page-content documents.

mod blog;
mod catalog;
mod consultation;
mod contact;
mod repository;

pub use blog::BlogFilter;
pub use consultation::ConsultationFilter;
pub use contact::ContactFilter;
pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Clamped pagination window for list queries.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, 100),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Total page count for a result set of `total` rows.
    pub fn pages_for(&self, total: i64) -> i64 {
        if total == 0 {
            0
        } else {
            (total + self.limit - 1) / self.limit
        }
    }
}

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS content_documents (
            id TEXT PRIMARY KEY,
            domain TEXT NOT NULL UNIQUE,
            body TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS blog_posts (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            excerpt TEXT,
            content TEXT NOT NULL,
            author TEXT,
            category TEXT NOT NULL,
            tags TEXT,
            featured_image TEXT,
            status TEXT NOT NULL DEFAULT 'draft',
            published_at TEXT,
            read_time INTEGER NOT NULL DEFAULT 1,
            seo_title TEXT NOT NULL,
            seo_description TEXT NOT NULL,
            is_featured INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_submissions (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            subject TEXT NOT NULL,
            message TEXT NOT NULL,
            urgency TEXT NOT NULL DEFAULT 'normal',
            status TEXT NOT NULL DEFAULT 'new',
            assigned_to TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS consultations (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            service_type TEXT NOT NULL,
            preferred_date TEXT NOT NULL,
            preferred_time TEXT NOT NULL DEFAULT 'morning',
            message TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            duration_minutes INTEGER NOT NULL,
            assigned_to TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            icon TEXT,
            category TEXT NOT NULL,
            price TEXT,
            features TEXT,
            display_order INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_popular INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_members (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            role_title TEXT NOT NULL,
            department TEXT NOT NULL,
            bio TEXT,
            photo TEXT,
            email TEXT,
            linkedin TEXT,
            display_order INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_visible INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Indexes for common filters
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_blog_posts_status ON blog_posts(status);
        CREATE INDEX IF NOT EXISTS idx_blog_posts_category ON blog_posts(category);
        CREATE INDEX IF NOT EXISTS idx_blog_posts_created_at ON blog_posts(created_at);
        CREATE INDEX IF NOT EXISTS idx_contact_status ON contact_submissions(status);
        CREATE INDEX IF NOT EXISTS idx_contact_created_at ON contact_submissions(created_at);
        CREATE INDEX IF NOT EXISTS idx_consultations_status ON consultations(status);
        CREATE INDEX IF NOT EXISTS idx_services_category ON services(category);
        CREATE INDEX IF NOT EXISTS idx_services_active ON services(is_active);
        CREATE INDEX IF NOT EXISTS idx_team_department ON team_members(department);
        "#,
    )
    .execute(pool)
    .await?;

    // A booking's email+date pair must be unique among non-cancelled rows;
    // backs up the pre-insert duplicate check against the read-then-write race.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_consultations_email_date
            ON consultations(email, preferred_date)
            WHERE status != 'cancelled';
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
