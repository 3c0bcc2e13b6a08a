//! # Medical Leave Repository

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::error::RepositoryError;
use crate::models::Employee;
use crate::models::medical_leave::{
    self, ActiveModel as MedicalLeaveActiveModel, Entity as MedicalLeave,
};

/// Request data for recording a medical leave
#[derive(Debug, Clone)]
pub struct CreateMedicalLeaveRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Repository for MedicalLeave database operations
pub struct MedicalLeaveRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MedicalLeaveRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Leaves recorded for an employee, oldest record first.
    pub async fn list_for_employee(
        &self,
        employee_id: i32,
    ) -> Result<Vec<medical_leave::Model>, RepositoryError> {
        Employee::find_by_id(employee_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Employee", employee_id))?;

        MedicalLeave::find()
            .filter(medical_leave::Column::EmployeeId.eq(employee_id))
            .order_by_asc(medical_leave::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn create_medical_leave(
        &self,
        employee_id: i32,
        request: CreateMedicalLeaveRequest,
    ) -> Result<medical_leave::Model, RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        Employee::find_by_id(employee_id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Employee", employee_id))?;

        let leave = MedicalLeaveActiveModel {
            id: NotSet,
            employee_id: Set(employee_id),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            medical_leave_id = leave.id,
            employee_id,
            days = leave.days(),
            "Medical leave recorded"
        );

        Ok(leave)
    }

    pub async fn delete_medical_leave(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let leave = MedicalLeave::find_by_id(id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Medical leave", id))?;

        leave
            .delete(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(medical_leave_id = id, "Medical leave deleted");

        Ok(())
    }
}
