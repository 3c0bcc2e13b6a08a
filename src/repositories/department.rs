//! # Department Repository

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::error::RepositoryError;
use crate::forms::{MAX_NAME_LENGTH, validate_name};
use crate::models::department::{
    self, ActiveModel as DepartmentActiveModel, Entity as Department,
};
use crate::models::{Employee, employee};

/// Repository for Department database operations
pub struct DepartmentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DepartmentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_departments(&self) -> Result<Vec<department::Model>, RepositoryError> {
        Department::find()
            .order_by_asc(department::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn get_department(&self, id: i32) -> Result<department::Model, RepositoryError> {
        Department::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Department", id))
    }

    pub async fn create_department(
        &self,
        name: &str,
    ) -> Result<department::Model, RepositoryError> {
        let name = validate_name("name", name, MAX_NAME_LENGTH).map_err(RepositoryError::Validation)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let department = DepartmentActiveModel {
            id: NotSet,
            name: Set(name),
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(department_id = department.id, name = %department.name, "Department created");

        Ok(department)
    }

    /// Delete a department that no employee belongs to.
    pub async fn delete_department(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let department = Department::find_by_id(id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Department", id))?;

        let members = Employee::find()
            .filter(employee::Column::DepartmentId.eq(id))
            .count(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        if members > 0 {
            return Err(RepositoryError::Integrity(format!(
                "Department {} is still referenced by {} employee(s)",
                department.name, members
            )));
        }

        department
            .delete(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(department_id = id, "Department deleted");

        Ok(())
    }
}
