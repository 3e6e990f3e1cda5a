//! Migration to create the levels table.
//!
//! Levels are tenant-scoped and are referenced by level pricing plans; the
//! pricing write path asserts same-company ownership against this table.

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
                    .table(Levels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Levels::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Levels::Title).text().not_null())
                    .col(ColumnDef::new(Levels::CompanyId).integer().not_null())
                    .col(
                        ColumnDef::new(Levels::Status)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Levels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Levels::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_levels_company_id")
                            .from(Levels::Table, Levels::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_levels_company_id")
                    .table(Levels::Table)
                    .col(Levels::CompanyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Levels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Levels {
    Table,
    Id,
    Title,
    CompanyId,
    Status,
    CreatedAt,
    UpdatedAt,
}
