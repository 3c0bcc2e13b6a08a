//! # Employee Handlers
//!
//! Form workflow for employee records. Submissions arrive urlencoded; a
//! valid submission is persisted and answered with a `303 See Other` to the
//! list, an invalid one is echoed back with per-field errors.

use axum::{
    Form,
    extract::{Path, State, rejection::{FormRejection, PathRejection}},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ApiError, RepositoryError};
use crate::forms::{EmployeeFields, EmployeeForm, ValidationErrors};
use crate::models::employee;
use crate::repositories::EmployeeRepository;
use crate::server::AppState;

/// Where successful submissions are redirected
pub const EMPLOYEE_LIST_PATH: &str = "/employees";

/// Employee record as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDto {
    pub id: i32,
    #[schema(example = 123456)]
    pub employee_number: i32,
    #[schema(example = "Ah")]
    pub first_name: String,
    #[schema(example = "Tan")]
    pub last_name: String,
    pub salary: i32,
    pub months_employed: i16,
    pub leave_balance: i16,
    /// Owning user id
    pub owner: i32,
    /// Department id
    pub department: i32,
    /// Listing label, `"{employee_number} - {first_name} {last_name}"`
    #[schema(example = "123456 - Ah Tan")]
    pub display: String,
}

impl From<employee::Model> for EmployeeDto {
    fn from(model: employee::Model) -> Self {
        Self {
            display: model.to_string(),
            id: model.id,
            employee_number: model.employee_number,
            first_name: model.first_name,
            last_name: model.last_name,
            salary: model.salary,
            months_employed: model.months_employed,
            leave_balance: model.leave_balance,
            owner: model.user_id,
            department: model.department_id,
        }
    }
}

/// Employee record with derived leave figures
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDetailDto {
    pub employee: EmployeeDto,
    /// Leave balance minus recorded medical leaves; negative when overdrawn
    #[schema(example = 13)]
    pub remaining_leave: i64,
}

/// Form state: submitted values plus any per-field errors
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeFormView {
    pub values: EmployeeForm,
    pub errors: ValidationErrors,
}

impl EmployeeFormView {
    fn invalid(values: EmployeeForm, errors: ValidationErrors) -> Response {
        (StatusCode::BAD_REQUEST, Json(Self { values, errors })).into_response()
    }
}

/// Delete confirmation summary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmationDto {
    pub id: i32,
    pub employee_number: i32,
    pub first_name: String,
    pub last_name: String,
}

/// List all employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employees", body = Vec<EmployeeDto>),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeDto>>, ApiError> {
    let employees = EmployeeRepository::new(&state.db).list_employees().await?;
    Ok(Json(employees.into_iter().map(EmployeeDto::from).collect()))
}

/// Empty creation form
#[utoipa::path(
    get,
    path = "/employees/create",
    responses(
        (status = 200, description = "Blank employee form", body = EmployeeFormView)
    ),
    tag = "employees"
)]
pub async fn create_employee_form() -> Json<EmployeeFormView> {
    Json(EmployeeFormView {
        values: EmployeeForm::default(),
        errors: ValidationErrors::new(),
    })
}

/// Submit a new employee
#[utoipa::path(
    post,
    path = "/employees/create",
    request_body(content = EmployeeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirects to the employee list"),
        (status = 400, description = "Form echoed with field errors", body = EmployeeFormView),
        (status = 409, description = "Employee number already in use", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    form: Result<Form<EmployeeForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = form?;
    let repo = EmployeeRepository::new(&state.db);

    submit(form, |fields| repo.create_employee(fields)).await
}

/// Employee detail with remaining leave
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(("id" = i32, Path, description = "Employee record id")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeDetailDto),
        (status = 404, description = "Employee not found", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn get_employee(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<EmployeeDetailDto>, ApiError> {
    let Path(id) = path?;
    let repo = EmployeeRepository::new(&state.db);
    let employee = repo.get_employee(id).await?;
    let remaining_leave = repo.remaining_leave(id).await?;

    Ok(Json(EmployeeDetailDto {
        employee: employee.into(),
        remaining_leave,
    }))
}

/// Update form pre-populated with the current record
#[utoipa::path(
    get,
    path = "/employees/{id}/update",
    params(("id" = i32, Path, description = "Employee record id")),
    responses(
        (status = 200, description = "Pre-populated employee form", body = EmployeeFormView),
        (status = 404, description = "Employee not found", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn update_employee_form(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<EmployeeFormView>, ApiError> {
    let Path(id) = path?;
    let employee = EmployeeRepository::new(&state.db).get_employee(id).await?;

    Ok(Json(EmployeeFormView {
        values: EmployeeForm::from_model(&employee),
        errors: ValidationErrors::new(),
    }))
}

/// Replace an employee with the submitted values
#[utoipa::path(
    post,
    path = "/employees/{id}/update",
    params(("id" = i32, Path, description = "Employee record id")),
    request_body(content = EmployeeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirects to the employee list"),
        (status = 400, description = "Form echoed with field errors", body = EmployeeFormView),
        (status = 404, description = "Employee not found", body = ApiError),
        (status = 409, description = "Employee number already in use", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    form: Result<Form<EmployeeForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = path?;
    let Form(form) = form?;
    let repo = EmployeeRepository::new(&state.db);

    // Missing records are reported before the submission is looked at.
    repo.get_employee(id).await?;

    submit(form, |fields| repo.update_employee(id, fields)).await
}

/// Delete confirmation
#[utoipa::path(
    get,
    path = "/employees/{id}/delete",
    params(("id" = i32, Path, description = "Employee record id")),
    responses(
        (status = 200, description = "Record to be deleted", body = DeleteConfirmationDto),
        (status = 404, description = "Employee not found", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn delete_employee_confirm(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeleteConfirmationDto>, ApiError> {
    let Path(id) = path?;
    let employee = EmployeeRepository::new(&state.db).get_employee(id).await?;

    Ok(Json(DeleteConfirmationDto {
        id: employee.id,
        employee_number: employee.employee_number,
        first_name: employee.first_name,
        last_name: employee.last_name,
    }))
}

/// Delete an employee with its medical leaves and memberships
#[utoipa::path(
    post,
    path = "/employees/{id}/delete",
    params(("id" = i32, Path, description = "Employee record id")),
    responses(
        (status = 303, description = "Deleted; redirects to the employee list"),
        (status = 404, description = "Employee not found", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Redirect, ApiError> {
    let Path(id) = path?;
    EmployeeRepository::new(&state.db).delete_employee(id).await?;
    Ok(Redirect::to(EMPLOYEE_LIST_PATH))
}

/// Validate a submission and hand the typed fields to `persist`.
async fn submit<F, Fut>(form: EmployeeForm, persist: F) -> Result<Response, ApiError>
where
    F: FnOnce(EmployeeFields) -> Fut,
    Fut: Future<Output = Result<employee::Model, RepositoryError>>,
{
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => return Ok(EmployeeFormView::invalid(form, errors)),
    };

    match persist(fields).await {
        Ok(_) => Ok(Redirect::to(EMPLOYEE_LIST_PATH).into_response()),
        Err(RepositoryError::Validation(errors)) => Ok(EmployeeFormView::invalid(form, errors)),
        Err(other) => Err(other.into()),
    }
}
