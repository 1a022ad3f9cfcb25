//! Blog post model: status lifecycle, slug derivation, and save-time
//! computed fields (read time, SEO title/description).

use serde::{Deserialize, Serialize};

use crate::validation::{FieldRule, RuleSet};

/// Words-per-minute used for the derived read time.
const READ_WPM: usize = 200;
const SEO_TITLE_MAX: usize = 60;
const SEO_DESCRIPTION_MAX: usize = 160;

pub const BLOG_CATEGORIES: &[&str] = &[
    "study-abroad",
    "test-prep",
    "visa",
    "career-guidance",
    "news",
];
pub const BLOG_STATUSES: &[&str] = &["draft", "published", "archived"];

/// Publication lifecycle of a post.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    Published,
    Archived,
}

impl BlogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Published => "published",
            BlogStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(BlogStatus::Draft),
            "published" => Some(BlogStatus::Published),
            "archived" => Some(BlogStatus::Archived),
            _ => None,
        }
    }

    /// Legal transitions: draft -> published -> archived. Archived is
    /// terminal; a same-status write is a no-op, not a transition.
    pub fn can_transition(self, to: BlogStatus) -> bool {
        matches!(
            (self, to),
            (BlogStatus::Draft, BlogStatus::Published)
                | (BlogStatus::Published, BlogStatus::Archived)
        ) || self == to
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BlogCategory {
    StudyAbroad,
    TestPrep,
    Visa,
    CareerGuidance,
    News,
}

impl BlogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogCategory::StudyAbroad => "study-abroad",
            BlogCategory::TestPrep => "test-prep",
            BlogCategory::Visa => "visa",
            BlogCategory::CareerGuidance => "career-guidance",
            BlogCategory::News => "news",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "study-abroad" => Some(BlogCategory::StudyAbroad),
            "test-prep" => Some(BlogCategory::TestPrep),
            "visa" => Some(BlogCategory::Visa),
            "career-guidance" => Some(BlogCategory::CareerGuidance),
            "news" => Some(BlogCategory::News),
            _ => None,
        }
    }
}

/// A blog post as persisted and served.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub category: BlogCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    pub status: BlogStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// Derived at save time from content word count
    pub read_time: i64,
    pub seo_title: String,
    pub seo_description: String,
    pub is_featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPostRequest {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    pub category: BlogCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub status: Option<BlogStatus>,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub is_featured: Option<bool>,
}

/// Request body for updating an existing post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<BlogCategory>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub status: Option<BlogStatus>,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub is_featured: Option<bool>,
}

/// Field rules for creating a post.
pub fn create_rules() -> RuleSet {
    RuleSet::new()
        .field("title", vec![FieldRule::Required, FieldRule::MaxLength(200)])
        .field("slug", vec![FieldRule::Slug, FieldRule::MaxLength(100)])
        .field("excerpt", vec![FieldRule::MaxLength(500)])
        .field("content", vec![FieldRule::Required])
        .field("author", vec![FieldRule::MaxLength(100)])
        .field(
            "category",
            vec![FieldRule::Required, FieldRule::OneOf(BLOG_CATEGORIES)],
        )
        .field("tags", vec![FieldRule::EachMaxLength(30)])
        .field("featuredImage", vec![FieldRule::MaxLength(300)])
        .field("status", vec![FieldRule::OneOf(BLOG_STATUSES)])
        .field("seoTitle", vec![FieldRule::MaxLength(SEO_TITLE_MAX)])
        .field(
            "seoDescription",
            vec![FieldRule::MaxLength(SEO_DESCRIPTION_MAX)],
        )
}

pub fn update_rules() -> RuleSet {
    create_rules().without_required()
}

/// Derive a slug from a title: lowercase, alphanumerics kept, everything
/// else collapsed to single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_hyphen = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Minutes to read at 200 words per minute, minimum 1.
pub fn read_time_minutes(content: &str) -> i64 {
    let words = content.split_whitespace().count();
    (words.div_ceil(READ_WPM)).max(1) as i64
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// SEO title: explicit value, or the title truncated to 60 characters.
pub fn derive_seo_title(explicit: Option<&str>, title: &str) -> String {
    match explicit {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => truncate_chars(title, SEO_TITLE_MAX),
    }
}

/// SEO description: explicit value, or the excerpt truncated to 160 characters.
pub fn derive_seo_description(explicit: Option<&str>, excerpt: Option<&str>) -> String {
    match explicit {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => truncate_chars(excerpt.unwrap_or(""), SEO_DESCRIPTION_MAX),
    }
}
