//! Migration to create the school_years table.

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
                    .table(SchoolYears::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolYears::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SchoolYears::Title).text().not_null())
                    .col(ColumnDef::new(SchoolYears::StartDate).date().not_null())
                    .col(ColumnDef::new(SchoolYears::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(SchoolYears::Status)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(SchoolYears::CompanyId).integer().not_null())
                    .col(
                        ColumnDef::new(SchoolYears::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SchoolYears::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_school_years_company_id")
                            .from(SchoolYears::Table, SchoolYears::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_school_years_company_id")
                    .table(SchoolYears::Table)
                    .col(SchoolYears::CompanyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SchoolYears::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SchoolYears {
    Table,
    Id,
    Title,
    StartDate,
    EndDate,
    Status,
    CompanyId,
    CreatedAt,
    UpdatedAt,
}
