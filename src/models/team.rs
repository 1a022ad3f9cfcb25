//! Team roster model: flat document with active/visible toggles gating
//! public listings.

use serde::{Deserialize, Serialize};

use crate::validation::{FieldRule, RuleSet};

pub const DEPARTMENTS: &[&str] = &["counseling", "test-prep", "admissions", "operations"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Department {
    Counseling,
    TestPrep,
    Admissions,
    Operations,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Counseling => "counseling",
            Department::TestPrep => "test-prep",
            Department::Admissions => "admissions",
            Department::Operations => "operations",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "counseling" => Some(Department::Counseling),
            "test-prep" => Some(Department::TestPrep),
            "admissions" => Some(Department::Admissions),
            "operations" => Some(Department::Operations),
            _ => None,
        }
    }
}

/// A member of the consultancy team.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role_title: String,
    pub department: Department,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
    pub is_visible: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for adding a team member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMemberRequest {
    pub name: String,
    pub role_title: String,
    pub department: Department,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub display_order: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub is_visible: bool,
}

fn default_true() -> bool {
    true
}

/// Request body for updating a team member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamMemberRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role_title: Option<String>,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub display_order: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_visible: Option<bool>,
}

pub fn create_rules() -> RuleSet {
    RuleSet::new()
        .field("name", vec![FieldRule::Required, FieldRule::MaxLength(100)])
        .field(
            "roleTitle",
            vec![FieldRule::Required, FieldRule::MaxLength(100)],
        )
        .field(
            "department",
            vec![FieldRule::Required, FieldRule::OneOf(DEPARTMENTS)],
        )
        .field("bio", vec![FieldRule::MaxLength(1000)])
        .field("photo", vec![FieldRule::MaxLength(300)])
        .field("email", vec![FieldRule::Email])
        .field("linkedin", vec![FieldRule::Url])
        .field("displayOrder", vec![FieldRule::NumberRange(0.0, 10_000.0)])
}

pub fn update_rules() -> RuleSet {
    create_rules().without_required()
}
