//! Migration to create the planning_session_types table.
//!
//! Unlike the other catalogs this one has no soft-delete sentinel; removal
//! is a hard delete.

use sea_orm_migration::prelude::*;

use super::m2026_06_01_000001_create_companies::Companies;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlanningSessionTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlanningSessionTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlanningSessionTypes::Title).text().not_null())
                    .col(ColumnDef::new(PlanningSessionTypes::Type).text().not_null())
                    .col(
                        ColumnDef::new(PlanningSessionTypes::Coefficient)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlanningSessionTypes::CompanyId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlanningSessionTypes::Status)
                            .text()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(PlanningSessionTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PlanningSessionTypes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_planning_session_types_company_id")
                            .from(
                                PlanningSessionTypes::Table,
                                PlanningSessionTypes::CompanyId,
                            )
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_planning_session_types_company_id")
                    .table(PlanningSessionTypes::Table)
                    .col(PlanningSessionTypes::CompanyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlanningSessionTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PlanningSessionTypes {
    Table,
    Id,
    Title,
    Type,
    Coefficient,
    CompanyId,
    Status,
    CreatedAt,
    UpdatedAt,
}
