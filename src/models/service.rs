//! Service listing model: flat document with independent visibility toggles.

use serde::{Deserialize, Serialize};

use crate::validation::{FieldRule, RuleSet};

pub const SERVICE_CATEGORIES: &[&str] = &["study-abroad", "test-prep", "career", "visa"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    StudyAbroad,
    TestPrep,
    Career,
    Visa,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::StudyAbroad => "study-abroad",
            ServiceCategory::TestPrep => "test-prep",
            ServiceCategory::Career => "career",
            ServiceCategory::Visa => "visa",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "study-abroad" => Some(ServiceCategory::StudyAbroad),
            "test-prep" => Some(ServiceCategory::TestPrep),
            "career" => Some(ServiceCategory::Career),
            "visa" => Some(ServiceCategory::Visa),
            _ => None,
        }
    }
}

/// An offered consultancy service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub category: ServiceCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub display_order: i64,
    pub is_active: bool,
    pub is_popular: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub category: ServiceCategory,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub display_order: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_popular: bool,
}

fn default_true() -> bool {
    true
}

/// Request body for updating a service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<ServiceCategory>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub display_order: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_popular: Option<bool>,
}

pub fn create_rules() -> RuleSet {
    RuleSet::new()
        .field("title", vec![FieldRule::Required, FieldRule::MaxLength(100)])
        .field(
            "description",
            vec![FieldRule::Required, FieldRule::MaxLength(1000)],
        )
        .field("icon", vec![FieldRule::MaxLength(50)])
        .field(
            "category",
            vec![FieldRule::Required, FieldRule::OneOf(SERVICE_CATEGORIES)],
        )
        .field("price", vec![FieldRule::MaxLength(50)])
        .field("features", vec![FieldRule::EachMaxLength(150)])
        .field("displayOrder", vec![FieldRule::NumberRange(0.0, 10_000.0)])
}

pub fn update_rules() -> RuleSet {
    create_rules().without_required()
}
