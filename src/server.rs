//! # Server Configuration
//!
//! Router assembly, shared state and the OpenAPI document for the HR records service.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers::{self, departments, employees, medical_leaves, memberships, teams, users};
use crate::telemetry::trace_context_middleware;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/employees", get(employees::list_employees))
        .route(
            "/employees/create",
            get(employees::create_employee_form).post(employees::create_employee),
        )
        .route("/employees/{id}", get(employees::get_employee))
        .route(
            "/employees/{id}/update",
            get(employees::update_employee_form).post(employees::update_employee),
        )
        .route(
            "/employees/{id}/delete",
            get(employees::delete_employee_confirm).post(employees::delete_employee),
        )
        .route(
            "/employees/{id}/medical-leaves",
            get(medical_leaves::list_medical_leaves).post(medical_leaves::create_medical_leave),
        )
        .route(
            "/medical-leaves/{id}",
            delete(medical_leaves::delete_medical_leave),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user).delete(users::delete_user),
        )
        .route(
            "/departments",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/departments/{id}",
            get(departments::get_department).delete(departments::delete_department),
        )
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams/{id}", get(teams::get_team).delete(teams::delete_team))
        .route("/memberships", post(memberships::create_membership))
        .route(
            "/memberships/{id}",
            put(memberships::update_membership).delete(memberships::delete_membership),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(trace_context_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Starts the server with the given configuration
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let addr = config
        .bind_addr()
        .with_context(|| format!("Invalid server address: {}", config.api_bind_addr))?;
    let profile = config.profile.clone();

    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, %profile, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::health,
        crate::handlers::employees::list_employees,
        crate::handlers::employees::create_employee_form,
        crate::handlers::employees::create_employee,
        crate::handlers::employees::get_employee,
        crate::handlers::employees::update_employee_form,
        crate::handlers::employees::update_employee,
        crate::handlers::employees::delete_employee_confirm,
        crate::handlers::employees::delete_employee,
        crate::handlers::medical_leaves::list_medical_leaves,
        crate::handlers::medical_leaves::create_medical_leave,
        crate::handlers::medical_leaves::delete_medical_leave,
        crate::handlers::users::list_users,
        crate::handlers::users::create_user,
        crate::handlers::users::get_user,
        crate::handlers::users::delete_user,
        crate::handlers::departments::list_departments,
        crate::handlers::departments::create_department,
        crate::handlers::departments::get_department,
        crate::handlers::departments::delete_department,
        crate::handlers::teams::list_teams,
        crate::handlers::teams::create_team,
        crate::handlers::teams::get_team,
        crate::handlers::teams::delete_team,
        crate::handlers::memberships::create_membership,
        crate::handlers::memberships::update_membership,
        crate::handlers::memberships::delete_membership,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::error::ApiError,
            crate::forms::EmployeeForm,
            crate::forms::ValidationErrors,
            crate::handlers::HealthResponse,
            crate::handlers::employees::EmployeeDto,
            crate::handlers::employees::EmployeeDetailDto,
            crate::handlers::employees::EmployeeFormView,
            crate::handlers::employees::DeleteConfirmationDto,
            crate::handlers::medical_leaves::CreateMedicalLeaveRequestDto,
            crate::handlers::medical_leaves::MedicalLeaveDto,
            crate::handlers::users::CreateUserRequestDto,
            crate::handlers::users::UserDto,
            crate::handlers::departments::NamedRequestDto,
            crate::handlers::departments::DepartmentDto,
            crate::handlers::teams::TeamDto,
            crate::handlers::teams::TeamMemberDto,
            crate::handlers::teams::TeamDetailDto,
            crate::handlers::memberships::CreateMembershipRequestDto,
            crate::handlers::memberships::UpdateMembershipRequestDto,
            crate::handlers::memberships::MembershipDto,
        )
    ),
    tags(
        (name = "root", description = "Service information"),
        (name = "employees", description = "Employee form workflow"),
        (name = "medical-leaves", description = "Medical leave records"),
        (name = "users", description = "Owner identities"),
        (name = "departments", description = "Departments"),
        (name = "teams", description = "Teams and their members"),
        (name = "memberships", description = "Team memberships"),
    ),
    info(
        title = "HR Records API",
        description = "Employees, departments, teams and medical leave records",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
