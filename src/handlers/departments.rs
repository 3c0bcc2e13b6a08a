//! # Department Handlers

use axum::{
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::department;
use crate::repositories::DepartmentRepository;
use crate::server::AppState;

/// Request payload shared by departments and teams
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NamedRequestDto {
    /// Display name (required, max 255 characters)
    #[schema(example = "Accounting")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepartmentDto {
    pub id: i32,
    #[schema(example = "Accounting")]
    pub name: String,
}

impl From<department::Model> for DepartmentDto {
    fn from(model: department::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    responses(
        (status = 200, description = "All departments", body = Vec<DepartmentDto>)
    ),
    tag = "departments"
)]
pub async fn list_departments(
    State(state): State<AppState>,
) -> Result<Json<Vec<DepartmentDto>>, ApiError> {
    let departments = DepartmentRepository::new(&state.db)
        .list_departments()
        .await?;
    Ok(Json(departments.into_iter().map(DepartmentDto::from).collect()))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/departments",
    request_body = NamedRequestDto,
    responses(
        (status = 201, description = "Department created", body = DepartmentDto),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tag = "departments"
)]
pub async fn create_department(
    State(state): State<AppState>,
    payload: Result<Json<NamedRequestDto>, JsonRejection>,
) -> Result<(StatusCode, Json<DepartmentDto>), ApiError> {
    let Json(request) = payload?;
    let department = DepartmentRepository::new(&state.db)
        .create_department(&request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(department.into())))
}

/// Get a department
#[utoipa::path(
    get,
    path = "/departments/{id}",
    params(("id" = i32, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department found", body = DepartmentDto),
        (status = 404, description = "Department not found", body = ApiError)
    ),
    tag = "departments"
)]
pub async fn get_department(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<DepartmentDto>, ApiError> {
    let Path(id) = path?;
    let department = DepartmentRepository::new(&state.db).get_department(id).await?;
    Ok(Json(department.into()))
}

/// Delete a department no employee belongs to
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    params(("id" = i32, Path, description = "Department id")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 404, description = "Department not found", body = ApiError),
        (status = 409, description = "Department still has employees", body = ApiError)
    ),
    tag = "departments"
)]
pub async fn delete_department(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    DepartmentRepository::new(&state.db)
        .delete_department(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
