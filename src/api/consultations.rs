//! Consultation booking API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{created, success, success_msg, ApiResult, PageData};
use crate::db::{ConsultationFilter, Page};
use crate::errors::AppError;
use crate::models::consultation::{self};
use crate::models::{
    Consultation, ConsultationStatus, CreateConsultationRequest, ServiceType,
    UpdateConsultationRequest,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub service_type: Option<String>,
}

fn duplicate_booking_error() -> AppError {
    AppError::Conflict {
        field: "preferredDate".to_string(),
        message: "A booking already exists for this email on this date".to_string(),
    }
}

/// POST /api/consultations - Book a consultation (public form).
pub async fn create_consultation(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Consultation> {
    consultation::create_rules()
        .validate(&body)
        .map_err(AppError::Validation)?;
    let request: CreateConsultationRequest = serde_json::from_value(body)?;

    // Pre-check; the partial unique index catches the race
    if state
        .repo
        .find_active_booking(&request.email, &request.preferred_date)
        .await?
        .is_some()
    {
        return Err(duplicate_booking_error());
    }

    let booking = state.repo.create_consultation(&request).await?;

    let payload = json!({
        "id": booking.id,
        "name": booking.name,
        "email": booking.email,
        "serviceType": booking.service_type.as_str(),
        "preferredDate": booking.preferred_date,
        "preferredTime": booking.preferred_time.as_str(),
    });
    if let Err(e) = state.notifier.send("consultation.created", payload).await {
        tracing::warn!("Failed to deliver consultation notification: {}", e);
    }

    created(booking)
}

/// GET /api/consultations - List bookings for the counseling team.
pub async fn list_consultations(
    State(state): State<AppState>,
    Query(query): Query<ConsultationListQuery>,
) -> ApiResult<PageData<Consultation>> {
    let status = query
        .status
        .as_deref()
        .map(|s| {
            ConsultationStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{}'", s)))
        })
        .transpose()?;
    let service_type = query
        .service_type
        .as_deref()
        .map(|s| {
            ServiceType::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown service type '{}'", s)))
        })
        .transpose()?;

    let filter = ConsultationFilter {
        status,
        service_type,
    };
    let page = Page::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));

    let (bookings, total) = state.repo.list_consultations(&filter, page).await?;
    success(PageData::new(bookings, page, total))
}

/// GET /api/consultations/{id} - Get a single booking.
pub async fn get_consultation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Consultation> {
    match state.repo.get_consultation(&id).await? {
        Some(booking) => success(booking),
        None => Err(AppError::NotFound(format!("Consultation {} not found", id))),
    }
}

/// PUT /api/consultations/{id} - Work a booking.
pub async fn update_consultation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Consultation> {
    consultation::update_rules()
        .validate(&body)
        .map_err(AppError::Validation)?;
    let request: UpdateConsultationRequest = serde_json::from_value(body)?;

    let existing = state
        .repo
        .get_consultation(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Consultation {} not found", id)))?;

    if let Some(to) = request.status {
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

    // Moving the date must not collide with another live booking
    if let Some(date) = &request.preferred_date {
        if date != &existing.preferred_date {
            if let Some(other) = state.repo.find_active_booking(&existing.email, date).await? {
                if other.id != existing.id {
                    return Err(duplicate_booking_error());
                }
            }
        }
    }

    let booking = state.repo.update_consultation(&id, &request).await?;
    success(booking)
}

/// DELETE /api/consultations/{id} - Delete a booking.
pub async fn delete_consultation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_consultation(&id).await?;
    success_msg((), "Consultation deleted")
}
