//! Contact submission model.
//!
//! Submissions arrive through the public contact form and are worked by
//! admin/staff users through the status chain new -> in-progress ->
//! resolved -> closed.

use serde::{Deserialize, Serialize};

use crate::validation::{FieldRule, RuleSet};

pub const URGENCY_LEVELS: &[&str] = &["low", "normal", "high", "urgent"];
pub const CONTACT_STATUSES: &[&str] = &["new", "in-progress", "resolved", "closed"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Normal,
    High,
    Urgent,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::High => "high",
            Urgency::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Urgency::Low),
            "normal" => Some(Urgency::Normal),
            "high" => Some(Urgency::High),
            "urgent" => Some(Urgency::Urgent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ContactStatus {
    New,
    InProgress,
    Resolved,
    Closed,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::InProgress => "in-progress",
            ContactStatus::Resolved => "resolved",
            ContactStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(ContactStatus::New),
            "in-progress" => Some(ContactStatus::InProgress),
            "resolved" => Some(ContactStatus::Resolved),
            "closed" => Some(ContactStatus::Closed),
            _ => None,
        }
    }

    /// Adjacent-forward moves only; a same-status write is a no-op.
    pub fn can_transition(self, to: ContactStatus) -> bool {
        matches!(
            (self, to),
            (ContactStatus::New, ContactStatus::InProgress)
                | (ContactStatus::InProgress, ContactStatus::Resolved)
                | (ContactStatus::Resolved, ContactStatus::Closed)
        ) || self == to
    }

    /// Urgent submissions skip straight to in-progress at creation.
    pub fn initial_for(urgency: Urgency) -> Self {
        if urgency == Urgency::Urgent {
            ContactStatus::InProgress
        } else {
            ContactStatus::New
        }
    }
}

/// A contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub urgency: Urgency,
    pub status: ContactStatus,
    /// Weak reference to a counselor identity; not resolved here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Public request body for submitting the contact form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    #[serde(default = "default_urgency")]
    pub urgency: Urgency,
}

fn default_urgency() -> Urgency {
    Urgency::Normal
}

/// Admin/staff request body for working a submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    #[serde(default)]
    pub status: Option<ContactStatus>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn create_rules() -> RuleSet {
    RuleSet::new()
        .field("name", vec![FieldRule::Required, FieldRule::MaxLength(100)])
        .field("email", vec![FieldRule::Required, FieldRule::Email])
        .field("phone", vec![FieldRule::MaxLength(20)])
        .field(
            "subject",
            vec![FieldRule::Required, FieldRule::MaxLength(150)],
        )
        .field(
            "message",
            vec![FieldRule::Required, FieldRule::MaxLength(2000)],
        )
        .field("urgency", vec![FieldRule::OneOf(URGENCY_LEVELS)])
}

pub fn update_rules() -> RuleSet {
    RuleSet::new()
        .field("status", vec![FieldRule::OneOf(CONTACT_STATUSES)])
        .field("urgency", vec![FieldRule::OneOf(URGENCY_LEVELS)])
        .field("assignedTo", vec![FieldRule::MaxLength(100)])
        .field("notes", vec![FieldRule::MaxLength(2000)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgent_submissions_start_in_progress() {
        assert_eq!(
            ContactStatus::initial_for(Urgency::Urgent),
            ContactStatus::InProgress
        );
        assert_eq!(ContactStatus::initial_for(Urgency::High), ContactStatus::New);
        assert_eq!(
            ContactStatus::initial_for(Urgency::Normal),
            ContactStatus::New
        );
    }

    #[test]
    fn status_chain_is_forward_only() {
        assert!(ContactStatus::New.can_transition(ContactStatus::InProgress));
        assert!(ContactStatus::InProgress.can_transition(ContactStatus::Resolved));
        assert!(ContactStatus::Resolved.can_transition(ContactStatus::Closed));
        assert!(!ContactStatus::Closed.can_transition(ContactStatus::New));
        assert!(!ContactStatus::New.can_transition(ContactStatus::Resolved));
        assert!(ContactStatus::New.can_transition(ContactStatus::New));
    }
}
