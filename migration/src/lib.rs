//! Database migrations for the HR records service.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2020_09_01_000001_create_users;
mod m2020_09_01_000002_create_departments;
mod m2020_09_01_000003_create_employees;
mod m2020_09_09_061000_create_medical_leaves;
mod m2020_09_10_090000_create_teams;
mod m2020_09_10_090100_create_memberships;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2020_09_01_000001_create_users::Migration),
            Box::new(m2020_09_01_000002_create_departments::Migration),
            Box::new(m2020_09_01_000003_create_employees::Migration),
            Box::new(m2020_09_09_061000_create_medical_leaves::Migration),
            Box::new(m2020_09_10_090000_create_teams::Migration),
            Box::new(m2020_09_10_090100_create_memberships::Migration),
        ]
    }
}
