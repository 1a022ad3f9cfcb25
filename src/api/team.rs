//! Team roster API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{created, success, success_msg, ApiResult, PageData};
use crate::auth::OptionalIdentity;
use crate::db::Page;
use crate::errors::AppError;
use crate::models::team::{self};
use crate::models::{CreateTeamMemberRequest, Department, TeamMember, UpdateTeamMemberRequest};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub department: Option<String>,
}

/// GET /api/team - List team members. Anonymous callers only see members
/// that are both active and visible.
pub async fn list_team_members(
    State(state): State<AppState>,
    identity: OptionalIdentity,
    Query(query): Query<TeamListQuery>,
) -> ApiResult<PageData<TeamMember>> {
    let department = query
        .department
        .as_deref()
        .map(|s| {
            Department::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown department '{}'", s)))
        })
        .transpose()?;
    let page = Page::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));

    let (members, total) = state
        .repo
        .list_team_members(department, !identity.can_view_hidden(), page)
        .await?;
    success(PageData::new(members, page, total))
}

/// GET /api/team/{id} - Get a single team member.
pub async fn get_team_member(
    State(state): State<AppState>,
    identity: OptionalIdentity,
    Path(id): Path<String>,
) -> ApiResult<TeamMember> {
    let member = state
        .repo
        .get_team_member(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team member {} not found", id)))?;

    if !(member.is_active && member.is_visible) && !identity.can_view_hidden() {
        return Err(AppError::NotFound(format!("Team member {} not found", id)));
    }
    success(member)
}

/// POST /api/team - Add a team member.
pub async fn create_team_member(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<TeamMember> {
    team::create_rules()
        .validate(&body)
        .map_err(AppError::Validation)?;
    let request: CreateTeamMemberRequest = serde_json::from_value(body)?;

    let member = state.repo.create_team_member(&request).await?;
    created(member)
}

/// PUT /api/team/{id} - Update a team member.
pub async fn update_team_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<TeamMember> {
    team::update_rules()
        .validate(&body)
        .map_err(AppError::Validation)?;
    let request: UpdateTeamMemberRequest = serde_json::from_value(body)?;

    let member = state.repo.update_team_member(&id, &request).await?;
    success(member)
}

/// DELETE /api/team/{id} - Remove a team member.
pub async fn delete_team_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_team_member(&id).await?;
    success_msg((), "Team member deleted")
}

/// PATCH /api/team/{id}/toggle-active - Flip the active flag.
pub async fn toggle_team_member_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TeamMember> {
    let member = state.repo.toggle_team_member_active(&id).await?;
    success(member)
}

/// PATCH /api/team/{id}/toggle-visible - Flip the visible flag.
pub async fn toggle_team_member_visible(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TeamMember> {
    let member = state.repo.toggle_team_member_visible(&id).await?;
    success(member)
}
