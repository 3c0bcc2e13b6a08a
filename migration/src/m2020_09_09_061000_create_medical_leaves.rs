//! Migration to create the medical_leaves table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MedicalLeaves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MedicalLeaves::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MedicalLeaves::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(MedicalLeaves::StartDate).date().not_null())
                    .col(ColumnDef::new(MedicalLeaves::EndDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medical_leaves_employee_id")
                            .from(MedicalLeaves::Table, MedicalLeaves::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_medical_leaves_employee_id")
                    .table(MedicalLeaves::Table)
                    .col(MedicalLeaves::EmployeeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_medical_leaves_employee_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MedicalLeaves::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MedicalLeaves {
    Table,
    Id,
    EmployeeId,
    StartDate,
    EndDate,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
}
