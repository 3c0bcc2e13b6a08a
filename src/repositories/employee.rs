//! # Employee Repository
//!
//! Create, read, full-replace update and cascading delete for employee
//! records. Department and owner references are checked inside the same
//! transaction as the write, so a stale choice surfaces as a field error
//! rather than a constraint failure.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, ModelTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::error::RepositoryError;
use crate::forms::{EmployeeFields, INVALID_CHOICE, ValidationErrors};
use crate::models::employee::{self, ActiveModel as EmployeeActiveModel, Entity as Employee};
use crate::models::{Department, MedicalLeave, Membership, User, medical_leave, membership};

/// Repository for Employee database operations
pub struct EmployeeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmployeeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List every employee, ordered by record id.
    pub async fn list_employees(&self) -> Result<Vec<employee::Model>, RepositoryError> {
        Employee::find()
            .order_by_asc(employee::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn get_employee(&self, id: i32) -> Result<employee::Model, RepositoryError> {
        find_employee(self.db, id).await
    }

    /// Persist a new employee from validated form fields.
    pub async fn create_employee(
        &self,
        fields: EmployeeFields,
    ) -> Result<employee::Model, RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        ensure_choices_exist(&txn, &fields).await?;
        ensure_employee_number_free(&txn, fields.employee_number, None).await?;

        let employee = EmployeeActiveModel {
            id: NotSet,
            user_id: Set(fields.owner),
            employee_number: Set(fields.employee_number),
            first_name: Set(fields.first_name),
            last_name: Set(fields.last_name),
            salary: Set(fields.salary),
            months_employed: Set(fields.months_employed),
            leave_balance: Set(fields.leave_balance),
            department_id: Set(fields.department),
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            employee_id = employee.id,
            employee_number = employee.employee_number,
            "Employee created"
        );

        Ok(employee)
    }

    /// Replace every field of an existing employee.
    pub async fn update_employee(
        &self,
        id: i32,
        fields: EmployeeFields,
    ) -> Result<employee::Model, RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let existing = find_employee(&txn, id).await?;
        ensure_choices_exist(&txn, &fields).await?;
        ensure_employee_number_free(&txn, fields.employee_number, Some(id)).await?;

        let mut active = existing.into_active_model();
        active.user_id = Set(fields.owner);
        active.employee_number = Set(fields.employee_number);
        active.first_name = Set(fields.first_name);
        active.last_name = Set(fields.last_name);
        active.salary = Set(fields.salary);
        active.months_employed = Set(fields.months_employed);
        active.leave_balance = Set(fields.leave_balance);
        active.department_id = Set(fields.department);

        let employee = active
            .update(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(employee_id = employee.id, "Employee updated");

        Ok(employee)
    }

    /// Delete an employee together with its medical leaves and team memberships.
    pub async fn delete_employee(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let employee = find_employee(&txn, id).await?;

        let leaves = MedicalLeave::delete_many()
            .filter(medical_leave::Column::EmployeeId.eq(id))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        let memberships = Membership::delete_many()
            .filter(membership::Column::EmployeeId.eq(id))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        employee
            .delete(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            employee_id = id,
            medical_leaves = leaves.rows_affected,
            memberships = memberships.rows_affected,
            "Employee deleted"
        );

        Ok(())
    }

    /// Leave balance minus recorded medical leaves; negative when overdrawn.
    pub async fn remaining_leave(&self, id: i32) -> Result<i64, RepositoryError> {
        let employee = self.get_employee(id).await?;
        employee
            .remaining_leave(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}

async fn find_employee<C>(conn: &C, id: i32) -> Result<employee::Model, RepositoryError>
where
    C: ConnectionTrait,
{
    Employee::find_by_id(id)
        .one(conn)
        .await
        .map_err(RepositoryError::database_error)?
        .ok_or_else(|| RepositoryError::not_found("Employee", id))
}

/// Owner and department must name existing records.
async fn ensure_choices_exist<C>(conn: &C, fields: &EmployeeFields) -> Result<(), RepositoryError>
where
    C: ConnectionTrait,
{
    let mut errors = ValidationErrors::new();

    let owner = User::find_by_id(fields.owner)
        .one(conn)
        .await
        .map_err(RepositoryError::database_error)?;
    if owner.is_none() {
        errors.add("owner", INVALID_CHOICE);
    }

    let department = Department::find_by_id(fields.department)
        .one(conn)
        .await
        .map_err(RepositoryError::database_error)?;
    if department.is_none() {
        errors.add("department", INVALID_CHOICE);
    }

    errors.into_result().map_err(RepositoryError::Validation)
}

async fn ensure_employee_number_free<C>(
    conn: &C,
    employee_number: i32,
    exclude_id: Option<i32>,
) -> Result<(), RepositoryError>
where
    C: ConnectionTrait,
{
    let mut query = Employee::find().filter(employee::Column::EmployeeNumber.eq(employee_number));
    if let Some(id) = exclude_id {
        query = query.filter(employee::Column::Id.ne(id));
    }

    let taken = query
        .count(conn)
        .await
        .map_err(RepositoryError::database_error)?;

    if taken > 0 {
        return Err(RepositoryError::Integrity(format!(
            "Employee with this employee number {employee_number} already exists"
        )));
    }

    Ok(())
}
