//! Employee entity model
//!
//! This module contains the SeaORM entity model for the employees table.
//! An employee belongs to exactly one department and one owning user (both
//! restrict-on-delete) and owns its medical leaves and team memberships
//! (cascade-on-delete).

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::{ModelTrait, PaginatorTrait};

/// Leave entitlement granted when none is supplied
pub const DEFAULT_LEAVE_BALANCE: i16 = 14;

/// Lowest valid six-digit employee number
pub const EMPLOYEE_NUMBER_MIN: i32 = 100_000;

/// Highest valid six-digit employee number
pub const EMPLOYEE_NUMBER_MAX: i32 = 999_999;

/// Employee record
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Internal record identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning user account
    pub user_id: i32,

    /// Six-digit business identifier, unique across employees
    #[sea_orm(unique)]
    pub employee_number: i32,

    pub first_name: String,

    pub last_name: String,

    pub salary: i32,

    pub months_employed: i16,

    /// Annual leave entitlement in days
    pub leave_balance: i16,

    pub department_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Restrict"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id",
        on_delete = "Restrict"
    )]
    Department,
    #[sea_orm(has_many = "super::medical_leave::Entity")]
    MedicalLeave,
    #[sea_orm(has_many = "super::membership::Entity")]
    Membership,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::medical_leave::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MedicalLeave.def()
    }
}

impl Related<super::membership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Membership.def()
    }
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        super::membership::Relation::Team.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::membership::Relation::Employee.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Leave left after `leaves_taken` medical-leave records.
    ///
    /// Not clamped: a negative result means the balance is overdrawn.
    pub fn remaining_leave_after(&self, leaves_taken: u64) -> i64 {
        let taken = i64::try_from(leaves_taken).unwrap_or(i64::MAX);
        i64::from(self.leave_balance).saturating_sub(taken)
    }

    /// Leave balance minus the number of recorded medical leaves.
    pub async fn remaining_leave<C>(&self, db: &C) -> Result<i64, DbErr>
    where
        C: ConnectionTrait,
    {
        let taken = self
            .find_related(super::medical_leave::Entity)
            .count(db)
            .await?;
        Ok(self.remaining_leave_after(taken))
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.employee_number, self.full_name())
    }
}
