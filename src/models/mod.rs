//! Data models for the EduConsult content backend.
//!
//! One module per content domain: entity struct, request bodies, enum types,
//! field-rule sets, and derived-field helpers.

pub mod blog;
pub mod consultation;
pub mod contact;
pub mod content;
pub mod service;
pub mod team;

pub use blog::{BlogCategory, BlogPost, BlogStatus, CreateBlogPostRequest, UpdateBlogPostRequest};
pub use consultation::{
    Consultation, ConsultationStatus, CreateConsultationRequest, ServiceType, TimeSlot,
    UpdateConsultationRequest,
};
pub use contact::{
    ContactStatus, ContactSubmission, CreateContactRequest, UpdateContactRequest, Urgency,
};
pub use content::{ContentDocument, ContentDomain};
pub use service::{CreateServiceRequest, Service, ServiceCategory, UpdateServiceRequest};
pub use team::{CreateTeamMemberRequest, Department, TeamMember, UpdateTeamMemberRequest};
