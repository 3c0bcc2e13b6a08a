//! # Team Repository

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::error::RepositoryError;
use crate::forms::{MAX_NAME_LENGTH, validate_name};
use crate::models::team::{self, ActiveModel as TeamActiveModel, Entity as Team};
use crate::models::{Employee, Membership, employee, membership};

/// Repository for Team database operations
pub struct TeamRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_teams(&self) -> Result<Vec<team::Model>, RepositoryError> {
        Team::find()
            .order_by_asc(team::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn get_team(&self, id: i32) -> Result<team::Model, RepositoryError> {
        Team::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Team", id))
    }

    pub async fn create_team(&self, name: &str) -> Result<team::Model, RepositoryError> {
        let name = validate_name("name", name, MAX_NAME_LENGTH).map_err(RepositoryError::Validation)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let team = TeamActiveModel {
            id: NotSet,
            name: Set(name),
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(team_id = team.id, name = %team.name, "Team created");

        Ok(team)
    }

    /// Memberships of a team paired with the member employee, ordered by membership id.
    pub async fn list_members(
        &self,
        id: i32,
    ) -> Result<Vec<(membership::Model, employee::Model)>, RepositoryError> {
        let team = self.get_team(id).await?;

        let rows = team
            .find_related(Membership)
            .find_also_related(Employee)
            .order_by_asc(membership::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(membership, employee)| employee.map(|employee| (membership, employee)))
            .collect())
    }

    /// Delete a team and every membership in it.
    pub async fn delete_team(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let team = Team::find_by_id(id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Team", id))?;

        let memberships = Membership::delete_many()
            .filter(membership::Column::TeamId.eq(id))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        team.delete(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            team_id = id,
            memberships = memberships.rows_affected,
            "Team deleted"
        );

        Ok(())
    }
}
