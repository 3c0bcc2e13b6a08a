//! # Membership Repository
//!
//! Links employees to teams. The joined date is stamped by the entity on
//! every save, so creating a membership and changing its role both move it
//! to the current date.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait, NotSet, Set,
    TransactionTrait,
};

use crate::error::RepositoryError;
use crate::forms::{INVALID_CHOICE, MAX_NAME_LENGTH, ValidationErrors, validate_name};
use crate::models::membership::{self, ActiveModel as MembershipActiveModel, Entity as Membership};
use crate::models::{Employee, Team};

/// Request data for adding an employee to a team
#[derive(Debug, Clone)]
pub struct CreateMembershipRequest {
    pub employee_id: i32,
    pub team_id: i32,
    pub role: String,
}

/// Repository for Membership database operations
pub struct MembershipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MembershipRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_membership(&self, id: i32) -> Result<membership::Model, RepositoryError> {
        Membership::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Membership", id))
    }

    pub async fn create_membership(
        &self,
        request: CreateMembershipRequest,
    ) -> Result<membership::Model, RepositoryError> {
        let role = validate_name("role", &request.role, MAX_NAME_LENGTH)
            .map_err(RepositoryError::Validation)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let mut errors = ValidationErrors::new();
        let employee = Employee::find_by_id(request.employee_id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        if employee.is_none() {
            errors.add("employee", INVALID_CHOICE);
        }
        let team = Team::find_by_id(request.team_id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        if team.is_none() {
            errors.add("team", INVALID_CHOICE);
        }
        errors.into_result().map_err(RepositoryError::Validation)?;

        let membership = MembershipActiveModel {
            id: NotSet,
            employee_id: Set(request.employee_id),
            team_id: Set(request.team_id),
            joined_date: NotSet,
            role: Set(role),
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            membership_id = membership.id,
            employee_id = membership.employee_id,
            team_id = membership.team_id,
            "Membership created"
        );

        Ok(membership)
    }

    /// Change the role held in a team; the joined date is re-stamped.
    pub async fn update_role(
        &self,
        id: i32,
        role: &str,
    ) -> Result<membership::Model, RepositoryError> {
        let role = validate_name("role", role, MAX_NAME_LENGTH).map_err(RepositoryError::Validation)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let existing = Membership::find_by_id(id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Membership", id))?;

        let mut active = existing.into_active_model();
        active.role = Set(role);

        let membership = active
            .update(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(membership_id = id, "Membership updated");

        Ok(membership)
    }

    pub async fn delete_membership(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let membership = Membership::find_by_id(id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Membership", id))?;

        membership
            .delete(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(membership_id = id, "Membership deleted");

        Ok(())
    }
}
