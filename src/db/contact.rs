//! Contact submission CRUD.

use sqlx::Row;

use super::repository::{now, Repository};
use super::Page;
use crate::errors::AppError;
use crate::models::contact::{
    ContactStatus, ContactSubmission, CreateContactRequest, UpdateContactRequest, Urgency,
};

#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub status: Option<ContactStatus>,
    pub urgency: Option<Urgency>,
}

const CONTACT_COLUMNS: &str = "id, name, email, phone, subject, message, urgency, status, \
     assigned_to, notes, created_at, updated_at";

impl Repository {
    /// List submissions, newest first.
    pub async fn list_contacts(
        &self,
        filter: &ContactFilter,
        page: Page,
    ) -> Result<(Vec<ContactSubmission>, i64), AppError> {
        let mut conditions = String::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            conditions.push_str(" AND status = ?");
            binds.push(status.as_str().to_string());
        }
        if let Some(urgency) = filter.urgency {
            conditions.push_str(" AND urgency = ?");
            binds.push(urgency.as_str().to_string());
        }

        let count_sql = format!(
            "SELECT COUNT(*) AS total FROM contact_submissions WHERE 1=1{}",
            conditions
        );
        let mut count_query = sqlx::query(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total: i64 = count_query.fetch_one(&self.pool).await?.get("total");

        let list_sql = format!(
            "SELECT {} FROM contact_submissions WHERE 1=1{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            CONTACT_COLUMNS, conditions
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

        let submissions = rows
            .iter()
            .map(contact_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((submissions, total))
    }

    /// Get a submission by ID.
    pub async fn get_contact(&self, id: &str) -> Result<Option<ContactSubmission>, AppError> {
        let sql = format!(
            "SELECT {} FROM contact_submissions WHERE id = ?",
            CONTACT_COLUMNS
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(contact_from_row).transpose()
    }

    /// Create a submission. Urgent submissions start in-progress.
    pub async fn create_contact(
        &self,
        request: &CreateContactRequest,
    ) -> Result<ContactSubmission, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now();
        let status = ContactStatus::initial_for(request.urgency);

        sqlx::query(
            r#"INSERT INTO contact_submissions (
                id, name, email, phone, subject, message, urgency, status,
                assigned_to, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL, NULL, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.subject)
        .bind(&request.message)
        .bind(request.urgency.as_str())
        .bind(status.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(ContactSubmission {
            id,
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            subject: request.subject.clone(),
            message: request.message.clone(),
            urgency: request.urgency,
            status,
            assigned_to: None,
            notes: None,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Merge a partial staff update into an existing submission.
    pub async fn update_contact(
        &self,
        id: &str,
        request: &UpdateContactRequest,
    ) -> Result<ContactSubmission, AppError> {
        let existing = self
            .get_contact(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contact submission {} not found", id)))?;

        let now = now();
        let status = request.status.unwrap_or(existing.status);
        let urgency = request.urgency.unwrap_or(existing.urgency);
        let assigned_to = request.assigned_to.clone().or(existing.assigned_to);
        let notes = request.notes.clone().or(existing.notes);

        sqlx::query(
            "UPDATE contact_submissions SET status = ?, urgency = ?, assigned_to = ?, notes = ?, updated_at = ? WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(urgency.as_str())
        .bind(&assigned_to)
        .bind(&notes)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(ContactSubmission {
            status,
            urgency,
            assigned_to,
            notes,
            updated_at: now,
            ..existing
        })
    }

    /// Delete a submission.
    pub async fn delete_contact(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM contact_submissions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Contact submission {} not found",
                id
            )));
        }
        Ok(())
    }
}

fn contact_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<ContactSubmission, AppError> {
    let urgency_str: String = row.get("urgency");
    let urgency = Urgency::parse(&urgency_str)
        .ok_or_else(|| AppError::Internal(format!("Unknown urgency '{}'", urgency_str)))?;
    let status_str: String = row.get("status");
    let status = ContactStatus::parse(&status_str)
        .ok_or_else(|| AppError::Internal(format!("Unknown contact status '{}'", status_str)))?;

    Ok(ContactSubmission {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        subject: row.get("subject"),
        message: row.get("message"),
        urgency,
        status,
        assigned_to: row.get("assigned_to"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
