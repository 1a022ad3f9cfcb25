//! Consultation booking CRUD.

use sqlx::Row;

use super::repository::{now, Repository};
use super::Page;
use crate::errors::AppError;
use crate::models::consultation::{
    Consultation, ConsultationStatus, CreateConsultationRequest, ServiceType, TimeSlot,
    UpdateConsultationRequest,
};

#[derive(Debug, Clone, Default)]
pub struct ConsultationFilter {
    pub status: Option<ConsultationStatus>,
    pub service_type: Option<ServiceType>,
}

const CONSULTATION_COLUMNS: &str = "id, name, email, phone, service_type, preferred_date, \
     preferred_time, message, status, duration_minutes, assigned_to, created_at, updated_at";

impl Repository {
    /// List bookings, newest first.
    pub async fn list_consultations(
        &self,
        filter: &ConsultationFilter,
        page: Page,
    ) -> Result<(Vec<Consultation>, i64), AppError> {
        let mut conditions = String::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            conditions.push_str(" AND status = ?");
            binds.push(status.as_str().to_string());
        }
        if let Some(service_type) = filter.service_type {
            conditions.push_str(" AND service_type = ?");
            binds.push(service_type.as_str().to_string());
        }

        let count_sql = format!(
            "SELECT COUNT(*) AS total FROM consultations WHERE 1=1{}",
            conditions
        );
        let mut count_query = sqlx::query(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total: i64 = count_query.fetch_one(&self.pool).await?.get("total");

        let list_sql = format!(
            "SELECT {} FROM consultations WHERE 1=1{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            CONSULTATION_COLUMNS, conditions
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

        let bookings = rows
            .iter()
            .map(consultation_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((bookings, total))
    }

    /// Get a booking by ID.
    pub async fn get_consultation(&self, id: &str) -> Result<Option<Consultation>, AppError> {
        let sql = format!(
            "SELECT {} FROM consultations WHERE id = ?",
            CONSULTATION_COLUMNS
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(consultation_from_row).transpose()
    }

    /// Find a non-cancelled booking for the same email on the same date.
    pub async fn find_active_booking(
        &self,
        email: &str,
        preferred_date: &str,
    ) -> Result<Option<Consultation>, AppError> {
        let sql = format!(
            "SELECT {} FROM consultations WHERE email = ? AND preferred_date = ? AND status != 'cancelled'",
            CONSULTATION_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(email)
            .bind(preferred_date)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(consultation_from_row).transpose()
    }

    /// Create a booking. Duration falls back to the service type's default.
    pub async fn create_consultation(
        &self,
        request: &CreateConsultationRequest,
    ) -> Result<Consultation, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now();
        let duration_minutes = request
            .duration_minutes
            .unwrap_or_else(|| request.service_type.default_duration());

        sqlx::query(
            r#"INSERT INTO consultations (
                id, name, email, phone, service_type, preferred_date,
                preferred_time, message, status, duration_minutes, assigned_to,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?, NULL, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.service_type.as_str())
        .bind(&request.preferred_date)
        .bind(request.preferred_time.as_str())
        .bind(&request.message)
        .bind(duration_minutes)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Consultation {
            id,
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            service_type: request.service_type,
            preferred_date: request.preferred_date.clone(),
            preferred_time: request.preferred_time,
            message: request.message.clone(),
            status: ConsultationStatus::Pending,
            duration_minutes,
            assigned_to: None,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Merge a partial staff update into an existing booking.
    pub async fn update_consultation(
        &self,
        id: &str,
        request: &UpdateConsultationRequest,
    ) -> Result<Consultation, AppError> {
        let existing = self
            .get_consultation(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Consultation {} not found", id)))?;

        let now = now();
        let status = request.status.unwrap_or(existing.status);
        let preferred_date = request
            .preferred_date
            .clone()
            .unwrap_or(existing.preferred_date);
        let preferred_time = request.preferred_time.unwrap_or(existing.preferred_time);
        let duration_minutes = request.duration_minutes.unwrap_or(existing.duration_minutes);
        let assigned_to = request.assigned_to.clone().or(existing.assigned_to);
        let message = request.message.clone().or(existing.message);

        sqlx::query(
            r#"UPDATE consultations SET
                status = ?, preferred_date = ?, preferred_time = ?,
                duration_minutes = ?, assigned_to = ?, message = ?, updated_at = ?
            WHERE id = ?"#,
        )
        .bind(status.as_str())
        .bind(&preferred_date)
        .bind(preferred_time.as_str())
        .bind(duration_minutes)
        .bind(&assigned_to)
        .bind(&message)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Consultation {
            status,
            preferred_date,
            preferred_time,
            duration_minutes,
            assigned_to,
            message,
            updated_at: now,
            ..existing
        })
    }

    /// Delete a booking.
    pub async fn delete_consultation(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM consultations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Consultation {} not found",
                id
            )));
        }
        Ok(())
    }
}

fn consultation_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Consultation, AppError> {
    let service_type_str: String = row.get("service_type");
    let service_type = ServiceType::parse(&service_type_str)
        .ok_or_else(|| AppError::Internal(format!("Unknown service type '{}'", service_type_str)))?;
    let time_str: String = row.get("preferred_time");
    let preferred_time = TimeSlot::parse(&time_str)
        .ok_or_else(|| AppError::Internal(format!("Unknown time slot '{}'", time_str)))?;
    let status_str: String = row.get("status");
    let status = ConsultationStatus::parse(&status_str).ok_or_else(|| {
        AppError::Internal(format!("Unknown consultation status '{}'", status_str))
    })?;

    Ok(Consultation {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        service_type,
        preferred_date: row.get("preferred_date"),
        preferred_time,
        message: row.get("message"),
        status,
        duration_minutes: row.get("duration_minutes"),
        assigned_to: row.get("assigned_to"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
