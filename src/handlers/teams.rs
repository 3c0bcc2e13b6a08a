//! # Team Handlers

use axum::{
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::handlers::departments::NamedRequestDto;
use crate::models::team;
use crate::repositories::TeamRepository;
use crate::server::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamDto {
    pub id: i32,
    #[schema(example = "Payroll Taskforce")]
    pub name: String,
}

impl From<team::Model> for TeamDto {
    fn from(model: team::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// One member of a team
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamMemberDto {
    pub membership_id: i32,
    pub employee_id: i32,
    /// Employee listing label
    #[schema(example = "123456 - Ah Tan")]
    pub employee: String,
    #[schema(example = "Lead")]
    pub role: String,
    pub joined_date: NaiveDate,
}

/// Team with its members
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamDetailDto {
    pub id: i32,
    pub name: String,
    pub members: Vec<TeamMemberDto>,
}

/// List teams
#[utoipa::path(
    get,
    path = "/teams",
    responses(
        (status = 200, description = "All teams", body = Vec<TeamDto>)
    ),
    tag = "teams"
)]
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<TeamDto>>, ApiError> {
    let teams = TeamRepository::new(&state.db).list_teams().await?;
    Ok(Json(teams.into_iter().map(TeamDto::from).collect()))
}

/// Create a team
#[utoipa::path(
    post,
    path = "/teams",
    request_body = NamedRequestDto,
    responses(
        (status = 201, description = "Team created", body = TeamDto),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(state): State<AppState>,
    payload: Result<Json<NamedRequestDto>, JsonRejection>,
) -> Result<(StatusCode, Json<TeamDto>), ApiError> {
    let Json(request) = payload?;
    let team = TeamRepository::new(&state.db)
        .create_team(&request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(team.into())))
}

/// Get a team and its members
#[utoipa::path(
    get,
    path = "/teams/{id}",
    params(("id" = i32, Path, description = "Team id")),
    responses(
        (status = 200, description = "Team found", body = TeamDetailDto),
        (status = 404, description = "Team not found", body = ApiError)
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<TeamDetailDto>, ApiError> {
    let Path(id) = path?;
    let repo = TeamRepository::new(&state.db);
    let team = repo.get_team(id).await?;
    let members = repo
        .list_members(id)
        .await?
        .into_iter()
        .map(|(membership, employee)| TeamMemberDto {
            membership_id: membership.id,
            employee_id: employee.id,
            employee: employee.to_string(),
            role: membership.role,
            joined_date: membership.joined_date,
        })
        .collect();

    Ok(Json(TeamDetailDto {
        id: team.id,
        name: team.name,
        members,
    }))
}

/// Delete a team and its memberships
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    params(("id" = i32, Path, description = "Team id")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, description = "Team not found", body = ApiError)
    ),
    tag = "teams"
)]
pub async fn delete_team(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    TeamRepository::new(&state.db).delete_team(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
