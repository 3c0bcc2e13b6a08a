//! Migration to create the memberships table.
//!
//! Memberships are the join rows between employees and teams and cascade
//! away with either side.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Memberships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Memberships::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Memberships::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(Memberships::TeamId).integer().not_null())
                    .col(ColumnDef::new(Memberships::JoinedDate).date().not_null())
                    .col(ColumnDef::new(Memberships::Role).string_len(255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_memberships_employee_id")
                            .from(Memberships::Table, Memberships::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_memberships_team_id")
                            .from(Memberships::Table, Memberships::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_memberships_employee_id")
                    .table(Memberships::Table)
                    .col(Memberships::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_memberships_team_id")
                    .table(Memberships::Table)
                    .col(Memberships::TeamId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_memberships_employee_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_memberships_team_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Memberships::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Memberships {
    Table,
    Id,
    EmployeeId,
    TeamId,
    JoinedDate,
    Role,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
}
