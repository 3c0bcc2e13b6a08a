//! # Medical Leave Handlers

use axum::{
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::medical_leave;
use crate::repositories::{CreateMedicalLeaveRequest, MedicalLeaveRepository};
use crate::server::AppState;

/// Request payload for recording a medical leave
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMedicalLeaveRequestDto {
    #[schema(example = "2021-01-01")]
    pub start_date: NaiveDate,
    #[schema(example = "2021-01-03")]
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MedicalLeaveDto {
    pub id: i32,
    pub employee_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Length of the leave in days
    #[schema(example = 2)]
    pub days: i64,
}

impl From<medical_leave::Model> for MedicalLeaveDto {
    fn from(model: medical_leave::Model) -> Self {
        Self {
            days: model.days(),
            id: model.id,
            employee_id: model.employee_id,
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}

/// List an employee's medical leaves
#[utoipa::path(
    get,
    path = "/employees/{id}/medical-leaves",
    params(("id" = i32, Path, description = "Employee record id")),
    responses(
        (status = 200, description = "Medical leaves of the employee", body = Vec<MedicalLeaveDto>),
        (status = 404, description = "Employee not found", body = ApiError)
    ),
    tag = "medical-leaves"
)]
pub async fn list_medical_leaves(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<MedicalLeaveDto>>, ApiError> {
    let Path(id) = path?;
    let leaves = MedicalLeaveRepository::new(&state.db)
        .list_for_employee(id)
        .await?;
    Ok(Json(leaves.into_iter().map(MedicalLeaveDto::from).collect()))
}

/// Record a medical leave for an employee
#[utoipa::path(
    post,
    path = "/employees/{id}/medical-leaves",
    params(("id" = i32, Path, description = "Employee record id")),
    request_body = CreateMedicalLeaveRequestDto,
    responses(
        (status = 201, description = "Medical leave recorded", body = MedicalLeaveDto),
        (status = 400, description = "Invalid dates", body = ApiError),
        (status = 404, description = "Employee not found", body = ApiError)
    ),
    tag = "medical-leaves"
)]
pub async fn create_medical_leave(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CreateMedicalLeaveRequestDto>, JsonRejection>,
) -> Result<(StatusCode, Json<MedicalLeaveDto>), ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let leave = MedicalLeaveRepository::new(&state.db)
        .create_medical_leave(
            id,
            CreateMedicalLeaveRequest {
                start_date: request.start_date,
                end_date: request.end_date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(leave.into())))
}

/// Delete a medical leave record
#[utoipa::path(
    delete,
    path = "/medical-leaves/{id}",
    params(("id" = i32, Path, description = "Medical leave id")),
    responses(
        (status = 204, description = "Medical leave deleted"),
        (status = 404, description = "Medical leave not found", body = ApiError)
    ),
    tag = "medical-leaves"
)]
pub async fn delete_medical_leave(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    MedicalLeaveRepository::new(&state.db)
        .delete_medical_leave(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
