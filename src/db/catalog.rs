//! Services and team roster CRUD.
//!
//! Both are small ordered catalogs: list queries sort by display order and
//! the admin surface flips visibility flags in place.

use sqlx::Row;

use crate::errors::AppError;

use super::repository::{now, parse_json_array, Repository};
use super::Page;
use crate::models::service::{
    CreateServiceRequest, Service, ServiceCategory, UpdateServiceRequest,
};
use crate::models::team::{
    CreateTeamMemberRequest, Department, TeamMember, UpdateTeamMemberRequest,
};

const SERVICE_COLUMNS: &str = "id, title, description, icon, category, price, features, \
     display_order, is_active, is_popular, created_at, updated_at";

const TEAM_COLUMNS: &str = "id, name, role_title, department, bio, photo, email, linkedin, \
     display_order, is_active, is_visible, created_at, updated_at";

// ==================== SERVICES ====================

impl Repository {
    /// List services ordered by display order, with the total count for the
    /// unpaginated filter. `active_only` hides deactivated entries for the
    /// public surface.
    pub async fn list_services(
        &self,
        category: Option<ServiceCategory>,
        active_only: bool,
        page: Page,
    ) -> Result<(Vec<Service>, i64), AppError> {
        let mut conditions = String::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(category) = category {
            conditions.push_str(" AND category = ?");
            binds.push(category.as_str().to_string());
        }
        if active_only {
            conditions.push_str(" AND is_active = 1");
        }

        let count_sql = format!(
            "SELECT COUNT(*) AS total FROM services WHERE 1=1{}",
            conditions
        );
        let mut count_query = sqlx::query(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total: i64 = count_query.fetch_one(&self.pool).await?.get("total");

        let sql = format!(
            "SELECT {} FROM services WHERE 1=1{} ORDER BY display_order ASC, created_at ASC \
             LIMIT ? OFFSET ?",
            SERVICE_COLUMNS, conditions
        );
        let mut query = sqlx::query(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let rows = query
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let services = rows
            .iter()
            .map(service_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((services, total))
    }

    pub async fn get_service(&self, id: &str) -> Result<Option<Service>, AppError> {
        let sql = format!("SELECT {} FROM services WHERE id = ?", SERVICE_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(service_from_row).transpose()
    }

    pub async fn create_service(
        &self,
        request: &CreateServiceRequest,
    ) -> Result<Service, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now();
        let display_order = request.display_order.unwrap_or(0);
        let features_json = serde_json::to_string(&request.features).unwrap_or_default();

        sqlx::query(
            r#"INSERT INTO services (
                id, title, description, icon, category, price, features,
                display_order, is_active, is_popular, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.icon)
        .bind(request.category.as_str())
        .bind(&request.price)
        .bind(&features_json)
        .bind(display_order)
        .bind(request.is_active as i32)
        .bind(request.is_popular as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Service {
            id,
            title: request.title.clone(),
            description: request.description.clone(),
            icon: request.icon.clone(),
            category: request.category,
            price: request.price.clone(),
            features: request.features.clone(),
            display_order,
            is_active: request.is_active,
            is_popular: request.is_popular,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn update_service(
        &self,
        id: &str,
        request: &UpdateServiceRequest,
    ) -> Result<Service, AppError> {
        let existing = self
            .get_service(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))?;

        let now = now();
        let title = request.title.clone().unwrap_or(existing.title);
        let description = request.description.clone().unwrap_or(existing.description);
        let icon = request.icon.clone().or(existing.icon);
        let category = request.category.unwrap_or(existing.category);
        let price = request.price.clone().or(existing.price);
        let features = request.features.clone().unwrap_or(existing.features);
        let display_order = request.display_order.unwrap_or(existing.display_order);
        let is_active = request.is_active.unwrap_or(existing.is_active);
        let is_popular = request.is_popular.unwrap_or(existing.is_popular);
        let features_json = serde_json::to_string(&features).unwrap_or_default();

        sqlx::query(
            r#"UPDATE services SET
                title = ?, description = ?, icon = ?, category = ?, price = ?,
                features = ?, display_order = ?, is_active = ?, is_popular = ?,
                updated_at = ?
            WHERE id = ?"#,
        )
        .bind(&title)
        .bind(&description)
        .bind(&icon)
        .bind(category.as_str())
        .bind(&price)
        .bind(&features_json)
        .bind(display_order)
        .bind(is_active as i32)
        .bind(is_popular as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Service {
            id: id.to_string(),
            title,
            description,
            icon,
            category,
            price,
            features,
            display_order,
            is_active,
            is_popular,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    pub async fn delete_service(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Service {} not found", id)));
        }
        Ok(())
    }

    pub async fn toggle_service_active(&self, id: &str) -> Result<Service, AppError> {
        let existing = self
            .get_service(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))?;
        let now = now();

        sqlx::query("UPDATE services SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(!existing.is_active as i32)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Service {
            is_active: !existing.is_active,
            updated_at: now,
            ..existing
        })
    }

    pub async fn toggle_service_popular(&self, id: &str) -> Result<Service, AppError> {
        let existing = self
            .get_service(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))?;
        let now = now();

        sqlx::query("UPDATE services SET is_popular = ?, updated_at = ? WHERE id = ?")
            .bind(!existing.is_popular as i32)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Service {
            is_popular: !existing.is_popular,
            updated_at: now,
            ..existing
        })
    }
}

// ==================== TEAM MEMBERS ====================

impl Repository {
    /// List team members ordered by display order, with the total count for
    /// the unpaginated filter. `visible_only` keeps only rows that are both
    /// active and visible.
    pub async fn list_team_members(
        &self,
        department: Option<Department>,
        visible_only: bool,
        page: Page,
    ) -> Result<(Vec<TeamMember>, i64), AppError> {
        let mut conditions = String::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(department) = department {
            conditions.push_str(" AND department = ?");
            binds.push(department.as_str().to_string());
        }
        if visible_only {
            conditions.push_str(" AND is_active = 1 AND is_visible = 1");
        }

        let count_sql = format!(
            "SELECT COUNT(*) AS total FROM team_members WHERE 1=1{}",
            conditions
        );
        let mut count_query = sqlx::query(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total: i64 = count_query.fetch_one(&self.pool).await?.get("total");

        let sql = format!(
            "SELECT {} FROM team_members WHERE 1=1{} ORDER BY display_order ASC, created_at ASC \
             LIMIT ? OFFSET ?",
            TEAM_COLUMNS, conditions
        );
        let mut query = sqlx::query(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let rows = query
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let members = rows
            .iter()
            .map(team_member_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((members, total))
    }

    pub async fn get_team_member(&self, id: &str) -> Result<Option<TeamMember>, AppError> {
        let sql = format!("SELECT {} FROM team_members WHERE id = ?", TEAM_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(team_member_from_row).transpose()
    }

    pub async fn create_team_member(
        &self,
        request: &CreateTeamMemberRequest,
    ) -> Result<TeamMember, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now();
        let display_order = request.display_order.unwrap_or(0);

        sqlx::query(
            r#"INSERT INTO team_members (
                id, name, role_title, department, bio, photo, email, linkedin,
                display_order, is_active, is_visible, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.role_title)
        .bind(request.department.as_str())
        .bind(&request.bio)
        .bind(&request.photo)
        .bind(&request.email)
        .bind(&request.linkedin)
        .bind(display_order)
        .bind(request.is_active as i32)
        .bind(request.is_visible as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(TeamMember {
            id,
            name: request.name.clone(),
            role_title: request.role_title.clone(),
            department: request.department,
            bio: request.bio.clone(),
            photo: request.photo.clone(),
            email: request.email.clone(),
            linkedin: request.linkedin.clone(),
            display_order,
            is_active: request.is_active,
            is_visible: request.is_visible,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn update_team_member(
        &self,
        id: &str,
        request: &UpdateTeamMemberRequest,
    ) -> Result<TeamMember, AppError> {
        let existing = self
            .get_team_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team member {} not found", id)))?;

        let now = now();
        let name = request.name.clone().unwrap_or(existing.name);
        let role_title = request.role_title.clone().unwrap_or(existing.role_title);
        let department = request.department.unwrap_or(existing.department);
        let bio = request.bio.clone().or(existing.bio);
        let photo = request.photo.clone().or(existing.photo);
        let email = request.email.clone().or(existing.email);
        let linkedin = request.linkedin.clone().or(existing.linkedin);
        let display_order = request.display_order.unwrap_or(existing.display_order);
        let is_active = request.is_active.unwrap_or(existing.is_active);
        let is_visible = request.is_visible.unwrap_or(existing.is_visible);

        sqlx::query(
            r#"UPDATE team_members SET
                name = ?, role_title = ?, department = ?, bio = ?, photo = ?,
                email = ?, linkedin = ?, display_order = ?, is_active = ?,
                is_visible = ?, updated_at = ?
            WHERE id = ?"#,
        )
        .bind(&name)
        .bind(&role_title)
        .bind(department.as_str())
        .bind(&bio)
        .bind(&photo)
        .bind(&email)
        .bind(&linkedin)
        .bind(display_order)
        .bind(is_active as i32)
        .bind(is_visible as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(TeamMember {
            id: id.to_string(),
            name,
            role_title,
            department,
            bio,
            photo,
            email,
            linkedin,
            display_order,
            is_active,
            is_visible,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    pub async fn delete_team_member(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team member {} not found", id)));
        }
        Ok(())
    }

    pub async fn toggle_team_member_active(&self, id: &str) -> Result<TeamMember, AppError> {
        let existing = self
            .get_team_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team member {} not found", id)))?;
        let now = now();

        sqlx::query("UPDATE team_members SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(!existing.is_active as i32)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(TeamMember {
            is_active: !existing.is_active,
            updated_at: now,
            ..existing
        })
    }

    pub async fn toggle_team_member_visible(&self, id: &str) -> Result<TeamMember, AppError> {
        let existing = self
            .get_team_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team member {} not found", id)))?;
        let now = now();

        sqlx::query("UPDATE team_members SET is_visible = ?, updated_at = ? WHERE id = ?")
            .bind(!existing.is_visible as i32)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(TeamMember {
            is_visible: !existing.is_visible,
            updated_at: now,
            ..existing
        })
    }
}

fn service_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Service, AppError> {
    let category_str: String = row.get("category");
    let category = ServiceCategory::parse(&category_str).ok_or_else(|| {
        AppError::Internal(format!("Unknown service category '{}'", category_str))
    })?;
    let features_str: Option<String> = row.get("features");
    let is_active: i32 = row.get("is_active");
    let is_popular: i32 = row.get("is_popular");

    Ok(Service {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        icon: row.get("icon"),
        category,
        price: row.get("price"),
        features: features_str.map(|s| parse_json_array(&s)).unwrap_or_default(),
        display_order: row.get("display_order"),
        is_active: is_active != 0,
        is_popular: is_popular != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn team_member_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<TeamMember, AppError> {
    let department_str: String = row.get("department");
    let department = Department::parse(&department_str)
        .ok_or_else(|| AppError::Internal(format!("Unknown department '{}'", department_str)))?;
    let is_active: i32 = row.get("is_active");
    let is_visible: i32 = row.get("is_visible");

    Ok(TeamMember {
        id: row.get("id"),
        name: row.get("name"),
        role_title: row.get("role_title"),
        department,
        bio: row.get("bio"),
        photo: row.get("photo"),
        email: row.get("email"),
        linkedin: row.get("linkedin"),
        display_order: row.get("display_order"),
        is_active: is_active != 0,
        is_visible: is_visible != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
