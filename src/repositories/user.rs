//! # User Repository
//!
//! Owner identities that employee records belong to.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::error::RepositoryError;
use crate::forms::validate_name;
use crate::models::user::{self, ActiveModel as UserActiveModel, Entity as User};
use crate::models::{Employee, employee};

/// Maximum username length
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Repository for User database operations
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>, RepositoryError> {
        User::find()
            .order_by_asc(user::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn get_user(&self, id: i32) -> Result<user::Model, RepositoryError> {
        User::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("User", id))
    }

    pub async fn create_user(&self, username: &str) -> Result<user::Model, RepositoryError> {
        let username = validate_name("username", username, MAX_USERNAME_LENGTH)
            .map_err(RepositoryError::Validation)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let taken = User::find()
            .filter(user::Column::Username.eq(username.as_str()))
            .count(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        if taken > 0 {
            return Err(RepositoryError::Integrity(format!(
                "A user with username {username} already exists"
            )));
        }

        let user = UserActiveModel {
            id: NotSet,
            username: Set(username),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(user_id = user.id, "User created");

        Ok(user)
    }

    /// Delete a user that owns no employee records.
    pub async fn delete_user(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let user = User::find_by_id(id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("User", id))?;

        let owned = Employee::find()
            .filter(employee::Column::UserId.eq(id))
            .count(&txn)
            .await
            .map_err(RepositoryError::database_error)?;
        if owned > 0 {
            return Err(RepositoryError::Integrity(format!(
                "User {} still owns {} employee record(s)",
                user.username, owned
            )));
        }

        user.delete(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit()
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(user_id = id, "User deleted");

        Ok(())
    }
}
