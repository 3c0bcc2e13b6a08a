//! Test utilities for database testing.
//!
//! Sets up in-memory SQLite databases with migrations applied and inserts
//! the fixture rows employee records depend on.

use anyhow::Result;
use hr_records::config::AppConfig;
use hr_records::forms::EmployeeFields;
use hr_records::models::{department, user};
use hr_records::repositories::{DepartmentRepository, UserRepository};
use hr_records::server::{AppState, create_app};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;

/// Sets up an in-memory SQLite database with all migrations applied.
///
/// The pool is capped at one connection so every query sees the same
/// in-memory database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await?;
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Router over a fresh in-memory database, plus the database handle.
#[allow(dead_code)]
pub async fn setup_test_app() -> Result<(axum::Router, DatabaseConnection)> {
    let db = setup_test_db().await?;
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        db: db.clone(),
    };
    Ok((create_app(state), db))
}

#[allow(dead_code)]
pub async fn create_test_user(db: &DatabaseConnection, username: &str) -> Result<user::Model> {
    Ok(UserRepository::new(db).create_user(username).await?)
}

#[allow(dead_code)]
pub async fn create_test_department(
    db: &DatabaseConnection,
    name: &str,
) -> Result<department::Model> {
    Ok(DepartmentRepository::new(db).create_department(name).await?)
}

/// Valid employee fields for the given owner and department.
#[allow(dead_code)]
pub fn employee_fields(employee_number: i32, owner: i32, department: i32) -> EmployeeFields {
    EmployeeFields {
        employee_number,
        first_name: "Ah".to_string(),
        last_name: "Tan".to_string(),
        salary: 2000,
        months_employed: 3,
        owner,
        department,
        leave_balance: 14,
    }
}
