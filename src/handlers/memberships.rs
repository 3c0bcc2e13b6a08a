//! # Membership Handlers

use axum::{
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::membership;
use crate::repositories::{CreateMembershipRequest, MembershipRepository};
use crate::server::AppState;

/// Request payload for adding an employee to a team
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMembershipRequestDto {
    pub employee_id: i32,
    pub team_id: i32,
    #[schema(example = "Lead")]
    pub role: String,
}

/// Request payload for changing a member's role
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateMembershipRequestDto {
    #[schema(example = "Reviewer")]
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MembershipDto {
    pub id: i32,
    pub employee_id: i32,
    pub team_id: i32,
    pub role: String,
    /// Date of the last save
    pub joined_date: NaiveDate,
}

impl From<membership::Model> for MembershipDto {
    fn from(model: membership::Model) -> Self {
        Self {
            id: model.id,
            employee_id: model.employee_id,
            team_id: model.team_id,
            role: model.role,
            joined_date: model.joined_date,
        }
    }
}

/// Add an employee to a team
#[utoipa::path(
    post,
    path = "/memberships",
    request_body = CreateMembershipRequestDto,
    responses(
        (status = 201, description = "Membership created", body = MembershipDto),
        (status = 400, description = "Unknown employee or team, or invalid role", body = ApiError)
    ),
    tag = "memberships"
)]
pub async fn create_membership(
    State(state): State<AppState>,
    payload: Result<Json<CreateMembershipRequestDto>, JsonRejection>,
) -> Result<(StatusCode, Json<MembershipDto>), ApiError> {
    let Json(request) = payload?;
    let membership = MembershipRepository::new(&state.db)
        .create_membership(CreateMembershipRequest {
            employee_id: request.employee_id,
            team_id: request.team_id,
            role: request.role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(membership.into())))
}

/// Change a member's role; the joined date moves to today
#[utoipa::path(
    put,
    path = "/memberships/{id}",
    params(("id" = i32, Path, description = "Membership id")),
    request_body = UpdateMembershipRequestDto,
    responses(
        (status = 200, description = "Membership updated", body = MembershipDto),
        (status = 400, description = "Invalid role", body = ApiError),
        (status = 404, description = "Membership not found", body = ApiError)
    ),
    tag = "memberships"
)]
pub async fn update_membership(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateMembershipRequestDto>, JsonRejection>,
) -> Result<Json<MembershipDto>, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let membership = MembershipRepository::new(&state.db)
        .update_role(id, &request.role)
        .await?;
    Ok(Json(membership.into()))
}

/// Remove an employee from a team
#[utoipa::path(
    delete,
    path = "/memberships/{id}",
    params(("id" = i32, Path, description = "Membership id")),
    responses(
        (status = 204, description = "Membership deleted"),
        (status = 404, description = "Membership not found", body = ApiError)
    ),
    tag = "memberships"
)]
pub async fn delete_membership(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    MembershipRepository::new(&state.db)
        .delete_membership(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
