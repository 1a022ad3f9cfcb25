//! Blog post CRUD.

use sqlx::Row;

use super::repository::{now, parse_json_array, Repository};
use super::Page;
use crate::errors::AppError;
use crate::models::blog::{
    derive_seo_description, derive_seo_title, read_time_minutes, slugify, BlogCategory, BlogPost,
    BlogStatus, CreateBlogPostRequest, UpdateBlogPostRequest,
};

/// Equality filters for blog listings.
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    pub status: Option<BlogStatus>,
    pub category: Option<BlogCategory>,
    /// Substring match over title and excerpt
    pub search: Option<String>,
}

const BLOG_COLUMNS: &str = "id, title, slug, excerpt, content, author, category, tags, \
     featured_image, status, published_at, read_time, seo_title, seo_description, \
     is_featured, created_at, updated_at";

impl Repository {
    /// List posts matching the filter, newest first, with the total count
    /// for the unpaginated filter.
    pub async fn list_posts(
        &self,
        filter: &BlogFilter,
        page: Page,
    ) -> Result<(Vec<BlogPost>, i64), AppError> {
        let mut conditions = String::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            conditions.push_str(" AND status = ?");
            binds.push(status.as_str().to_string());
        }
        if let Some(category) = filter.category {
            conditions.push_str(" AND category = ?");
            binds.push(category.as_str().to_string());
        }
        if let Some(search) = &filter.search {
            conditions.push_str(" AND (title LIKE ? OR excerpt LIKE ?)");
            let pattern = format!("%{}%", search);
            binds.push(pattern.clone());
            binds.push(pattern);
        }

        let count_sql = format!(
            "SELECT COUNT(*) AS total FROM blog_posts WHERE 1=1{}",
            conditions
        );
        let mut count_query = sqlx::query(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total: i64 = count_query.fetch_one(&self.pool).await?.get("total");

        let list_sql = format!(
            "SELECT {} FROM blog_posts WHERE 1=1{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            BLOG_COLUMNS, conditions
        );
        let mut list_query = sqlx::query(&list_sql);
        for bind in &binds {
            list_query = list_query.bind(bind);
        }
        let rows = list_query
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let posts = rows
            .iter()
            .map(post_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((posts, total))
    }

    /// Get a post by ID.
    pub async fn get_post(&self, id: &str) -> Result<Option<BlogPost>, AppError> {
        let sql = format!("SELECT {} FROM blog_posts WHERE id = ?", BLOG_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(post_from_row).transpose()
    }

    /// Get a post by slug.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        let sql = format!("SELECT {} FROM blog_posts WHERE slug = ?", BLOG_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(post_from_row).transpose()
    }

    /// Create a new post, deriving slug, read time, and SEO fields.
    pub async fn create_post(&self, request: &CreateBlogPostRequest) -> Result<BlogPost, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now();

        let slug = match &request.slug {
            Some(s) if !s.trim().is_empty() => s.clone(),
            _ => slugify(&request.title),
        };
        let status = request.status.unwrap_or(BlogStatus::Draft);
        // Posts created directly as published get their stamp at creation
        let published_at = (status == BlogStatus::Published).then(|| now.clone());
        let read_time = read_time_minutes(&request.content);
        let seo_title = derive_seo_title(request.seo_title.as_deref(), &request.title);
        let seo_description =
            derive_seo_description(request.seo_description.as_deref(), request.excerpt.as_deref());
        let tags_json = serde_json::to_string(&request.tags).unwrap_or_default();
        let is_featured = request.is_featured.unwrap_or(false);

        sqlx::query(
            r#"INSERT INTO blog_posts (
                id, title, slug, excerpt, content, author, category, tags,
                featured_image, status, published_at, read_time, seo_title,
                seo_description, is_featured, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&slug)
        .bind(&request.excerpt)
        .bind(&request.content)
        .bind(&request.author)
        .bind(request.category.as_str())
        .bind(&tags_json)
        .bind(&request.featured_image)
        .bind(status.as_str())
        .bind(&published_at)
        .bind(read_time)
        .bind(&seo_title)
        .bind(&seo_description)
        .bind(is_featured as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(BlogPost {
            id,
            title: request.title.clone(),
            slug,
            excerpt: request.excerpt.clone(),
            content: request.content.clone(),
            author: request.author.clone(),
            category: request.category,
            tags: request.tags.clone(),
            featured_image: request.featured_image.clone(),
            status,
            published_at,
            read_time,
            seo_title,
            seo_description,
            is_featured,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Merge a partial update into an existing post, recomputing derived
    /// fields and stamping `published_at` on the first publish.
    pub async fn update_post(
        &self,
        id: &str,
        request: &UpdateBlogPostRequest,
    ) -> Result<BlogPost, AppError> {
        let existing = self
            .get_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post {} not found", id)))?;

        let now = now();
        let title = request.title.clone().unwrap_or(existing.title);
        let slug = request.slug.clone().unwrap_or(existing.slug);
        let excerpt = request.excerpt.clone().or(existing.excerpt);
        let content = request.content.clone().unwrap_or(existing.content);
        let author = request.author.clone().or(existing.author);
        let category = request.category.unwrap_or(existing.category);
        let tags = request.tags.clone().unwrap_or(existing.tags);
        let featured_image = request.featured_image.clone().or(existing.featured_image);
        let status = request.status.unwrap_or(existing.status);
        let is_featured = request.is_featured.unwrap_or(existing.is_featured);

        // Stamped exactly once, on the first transition into published
        let published_at = match (existing.published_at, status) {
            (Some(stamp), _) => Some(stamp),
            (None, BlogStatus::Published) => Some(now.clone()),
            (None, _) => None,
        };

        let read_time = read_time_minutes(&content);
        let seo_title = match &request.seo_title {
            Some(s) => derive_seo_title(Some(s), &title),
            None => derive_seo_title(Some(&existing.seo_title), &title),
        };
        let seo_description = match &request.seo_description {
            Some(s) => derive_seo_description(Some(s), excerpt.as_deref()),
            None => derive_seo_description(Some(&existing.seo_description), excerpt.as_deref()),
        };
        let tags_json = serde_json::to_string(&tags).unwrap_or_default();

        sqlx::query(
            r#"UPDATE blog_posts SET
                title = ?, slug = ?, excerpt = ?, content = ?, author = ?,
                category = ?, tags = ?, featured_image = ?, status = ?,
                published_at = ?, read_time = ?, seo_title = ?,
                seo_description = ?, is_featured = ?, updated_at = ?
            WHERE id = ?"#,
        )
        .bind(&title)
        .bind(&slug)
        .bind(&excerpt)
        .bind(&content)
        .bind(&author)
        .bind(category.as_str())
        .bind(&tags_json)
        .bind(&featured_image)
        .bind(status.as_str())
        .bind(&published_at)
        .bind(read_time)
        .bind(&seo_title)
        .bind(&seo_description)
        .bind(is_featured as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(BlogPost {
            id: id.to_string(),
            title,
            slug,
            excerpt,
            content,
            author,
            category,
            tags,
            featured_image,
            status,
            published_at,
            read_time,
            seo_title,
            seo_description,
            is_featured,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a post.
    pub async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Blog post {} not found", id)));
        }
        Ok(())
    }

    /// Flip the featured flag.
    pub async fn toggle_post_featured(&self, id: &str) -> Result<BlogPost, AppError> {
        let existing = self
            .get_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post {} not found", id)))?;
        let now = now();

        sqlx::query("UPDATE blog_posts SET is_featured = ?, updated_at = ? WHERE id = ?")
            .bind(!existing.is_featured as i32)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(BlogPost {
            is_featured: !existing.is_featured,
            updated_at: now,
            ..existing
        })
    }
}

fn post_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<BlogPost, AppError> {
    let status_str: String = row.get("status");
    let status = BlogStatus::parse(&status_str)
        .ok_or_else(|| AppError::Internal(format!("Unknown blog status '{}'", status_str)))?;
    let category_str: String = row.get("category");
    let category = BlogCategory::parse(&category_str)
        .ok_or_else(|| AppError::Internal(format!("Unknown blog category '{}'", category_str)))?;
    let tags_str: Option<String> = row.get("tags");
    let is_featured: i32 = row.get("is_featured");

    Ok(BlogPost {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        excerpt: row.get("excerpt"),
        content: row.get("content"),
        author: row.get("author"),
        category,
        tags: tags_str.map(|s| parse_json_array(&s)).unwrap_or_default(),
        featured_image: row.get("featured_image"),
        status,
        published_at: row.get("published_at"),
        read_time: row.get("read_time"),
        seo_title: row.get("seo_title"),
        seo_description: row.get("seo_description"),
        is_featured: is_featured != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
