//! Migration to create the employees table.
//!
//! Employees reference both their department and their owning user with
//! `RESTRICT` semantics: neither parent can be removed while an employee
//! still points at it.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Employees::EmployeeNumber)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string_len(255).not_null())
                    .col(ColumnDef::new(Employees::LastName).string_len(255).not_null())
                    .col(ColumnDef::new(Employees::Salary).integer().not_null())
                    .col(ColumnDef::new(Employees::MonthsEmployed).small_integer().not_null())
                    .col(
                        ColumnDef::new(Employees::LeaveBalance)
                            .small_integer()
                            .not_null()
                            .default(14),
                    )
                    .col(ColumnDef::new(Employees::DepartmentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_user_id")
                            .from(Employees::Table, Employees::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_department_id")
                            .from(Employees::Table, Employees::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_department_id")
                    .table(Employees::Table)
                    .col(Employees::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_user_id")
                    .table(Employees::Table)
                    .col(Employees::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_employees_department_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_employees_user_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    UserId,
    EmployeeNumber,
    FirstName,
    LastName,
    Salary,
    MonthsEmployed,
    LeaveBalance,
    DepartmentId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
}
