//! Consultation booking model.
//!
//! Bookings arrive through the public form with a future-dated preferred
//! date; duration defaults from the requested service type.

use serde::{Deserialize, Serialize};

use crate::validation::{FieldRule, RuleSet};

pub const SERVICE_TYPES: &[&str] = &[
    "study-abroad",
    "test-prep",
    "career-counseling",
    "visa-guidance",
];
pub const TIME_SLOTS: &[&str] = &["morning", "afternoon", "evening"];
pub const CONSULTATION_STATUSES: &[&str] = &[
    "pending",
    "confirmed",
    "completed",
    "cancelled",
    "rescheduled",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    StudyAbroad,
    TestPrep,
    CareerCounseling,
    VisaGuidance,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::StudyAbroad => "study-abroad",
            ServiceType::TestPrep => "test-prep",
            ServiceType::CareerCounseling => "career-counseling",
            ServiceType::VisaGuidance => "visa-guidance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "study-abroad" => Some(ServiceType::StudyAbroad),
            "test-prep" => Some(ServiceType::TestPrep),
            "career-counseling" => Some(ServiceType::CareerCounseling),
            "visa-guidance" => Some(ServiceType::VisaGuidance),
            _ => None,
        }
    }

    /// Default session length in minutes when the booking does not set one.
    pub fn default_duration(&self) -> i64 {
        match self {
            ServiceType::StudyAbroad => 60,
            ServiceType::TestPrep => 45,
            ServiceType::CareerCounseling => 45,
            ServiceType::VisaGuidance => 30,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(TimeSlot::Morning),
            "afternoon" => Some(TimeSlot::Afternoon),
            "evening" => Some(TimeSlot::Evening),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rescheduled,
}

impl ConsultationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationStatus::Pending => "pending",
            ConsultationStatus::Confirmed => "confirmed",
            ConsultationStatus::Completed => "completed",
            ConsultationStatus::Cancelled => "cancelled",
            ConsultationStatus::Rescheduled => "rescheduled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ConsultationStatus::Pending),
            "confirmed" => Some(ConsultationStatus::Confirmed),
            "completed" => Some(ConsultationStatus::Completed),
            "cancelled" => Some(ConsultationStatus::Cancelled),
            "rescheduled" => Some(ConsultationStatus::Rescheduled),
            _ => None,
        }
    }

    /// pending -> confirmed -> completed, with cancel/reschedule branches.
    /// A rescheduled booking can be re-confirmed or cancelled.
    pub fn can_transition(self, to: ConsultationStatus) -> bool {
        use ConsultationStatus::*;
        matches!(
            (self, to),
            (Pending, Confirmed)
                | (Confirmed, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (Confirmed, Rescheduled)
                | (Rescheduled, Confirmed)
                | (Rescheduled, Cancelled)
        ) || self == to
    }
}

/// A consultation booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: ServiceType,
    /// YYYY-MM-DD; must be in the future at booking time
    pub preferred_date: String,
    pub preferred_time: TimeSlot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: ConsultationStatus,
    pub duration_minutes: i64,
    /// Weak reference to a counselor identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Public request body for booking a consultation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsultationRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: ServiceType,
    pub preferred_date: String,
    #[serde(default = "default_time_slot")]
    pub preferred_time: TimeSlot,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

fn default_time_slot() -> TimeSlot {
    TimeSlot::Morning
}

/// Staff request body for working a booking.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConsultationRequest {
    #[serde(default)]
    pub status: Option<ConsultationStatus>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<TimeSlot>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn create_rules() -> RuleSet {
    RuleSet::new()
        .field("name", vec![FieldRule::Required, FieldRule::MaxLength(100)])
        .field("email", vec![FieldRule::Required, FieldRule::Email])
        .field("phone", vec![FieldRule::Required, FieldRule::MaxLength(20)])
        .field(
            "serviceType",
            vec![FieldRule::Required, FieldRule::OneOf(SERVICE_TYPES)],
        )
        .field(
            "preferredDate",
            vec![FieldRule::Required, FieldRule::FutureDate],
        )
        .field("preferredTime", vec![FieldRule::OneOf(TIME_SLOTS)])
        .field("message", vec![FieldRule::MaxLength(1000)])
        .field("durationMinutes", vec![FieldRule::NumberRange(15.0, 240.0)])
}

pub fn update_rules() -> RuleSet {
    RuleSet::new()
        .field("status", vec![FieldRule::OneOf(CONSULTATION_STATUSES)])
        .field("preferredDate", vec![FieldRule::FutureDate])
        .field("preferredTime", vec![FieldRule::OneOf(TIME_SLOTS)])
        .field("durationMinutes", vec![FieldRule::NumberRange(15.0, 240.0)])
        .field("assignedTo", vec![FieldRule::MaxLength(100)])
        .field("message", vec![FieldRule::MaxLength(1000)])
}
