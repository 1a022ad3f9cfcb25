//! Contact submission API endpoints.
//!
//! The create endpoint is the public contact form; everything else is the
//! staff triage surface.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{created, success, success_msg, ApiResult, PageData};
use crate::db::{ContactFilter, Page};
use crate::errors::AppError;
use crate::models::contact::{self};
use crate::models::{
    ContactStatus, ContactSubmission, CreateContactRequest, UpdateContactRequest, Urgency,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub urgency: Option<String>,
}

/// POST /api/contact - Submit the public contact form.
pub async fn create_contact_submission(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<ContactSubmission> {
    contact::create_rules()
        .validate(&body)
        .map_err(AppError::Validation)?;
    let request: CreateContactRequest = serde_json::from_value(body)?;

    let submission = state.repo.create_contact(&request).await?;

    let payload = json!({
        "id": submission.id,
        "name": submission.name,
        "email": submission.email,
        "subject": submission.subject,
        "urgency": submission.urgency.as_str(),
    });
    if let Err(e) = state.notifier.send("contact.created", payload).await {
        tracing::warn!("Failed to deliver contact notification: {}", e);
    }

    created(submission)
}

/// GET /api/contact - List submissions for triage.
pub async fn list_contact_submissions(
    State(state): State<AppState>,
    Query(query): Query<ContactListQuery>,
) -> ApiResult<PageData<ContactSubmission>> {
    let status = query
        .status
        .as_deref()
        .map(|s| {
            ContactStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{}'", s)))
        })
        .transpose()?;
    let urgency = query
        .urgency
        .as_deref()
        .map(|s| {
            Urgency::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown urgency '{}'", s)))
        })
        .transpose()?;

    let filter = ContactFilter { status, urgency };
    let page = Page::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));

    let (submissions, total) = state.repo.list_contacts(&filter, page).await?;
    success(PageData::new(submissions, page, total))
}

/// GET /api/contact/{id} - Get a single submission.
pub async fn get_contact_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ContactSubmission> {
    match state.repo.get_contact(&id).await? {
        Some(submission) => success(submission),
        None => Err(AppError::NotFound(format!(
            "Contact submission {} not found",
            id
        ))),
    }
}

/// PUT /api/contact/{id} - Work a submission (status, urgency, assignment).
pub async fn update_contact_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<ContactSubmission> {
    contact::update_rules()
        .validate(&body)
        .map_err(AppError::Validation)?;
    let request: UpdateContactRequest = serde_json::from_value(body)?;

    if let Some(to) = request.status {
        let existing = state
            .repo
            .get_contact(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contact submission {} not found", id)))?;
        if !existing.status.can_transition(to) {
            return Err(AppError::Conflict {
                field: "status".to_string(),
                message: format!(
                    "Cannot change status from '{}' to '{}'",
                    existing.status.as_str(),
                    to.as_str()
                ),
            });
        }
    }

    let submission = state.repo.update_contact(&id, &request).await?;
    success(submission)
}

/// DELETE /api/contact/{id} - Delete a submission.
pub async fn delete_contact_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_contact(&id).await?;
    success_msg((), "Contact submission deleted")
}
