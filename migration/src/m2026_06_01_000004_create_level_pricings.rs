//! Migration to create the level_pricings table.
//!
//! Pricing rows are soft-deleted by setting status to -2; the row is kept.

use sea_orm_migration::prelude::*;

use super::m2026_06_01_000001_create_companies::Companies;
use super::m2026_06_01_000002_create_levels::Levels;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LevelPricings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LevelPricings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LevelPricings::LevelId).integer().not_null())
                    .col(ColumnDef::new(LevelPricings::Title).text().not_null())
                    .col(ColumnDef::new(LevelPricings::Amount).double().not_null())
                    .col(
                        ColumnDef::new(LevelPricings::Occurrences)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(LevelPricings::EveryMonth)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LevelPricings::CompanyId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LevelPricings::Status)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(
                        ColumnDef::new(LevelPricings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(LevelPricings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_level_pricings_level_id")
                            .from(LevelPricings::Table, LevelPricings::LevelId)
                            .to(Levels::Table, Levels::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_level_pricings_company_id")
                            .from(LevelPricings::Table, LevelPricings::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_level_pricings_company_id")
                    .table(LevelPricings::Table)
                    .col(LevelPricings::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_level_pricings_level_id")
                    .table(LevelPricings::Table)
                    .col(LevelPricings::LevelId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LevelPricings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LevelPricings {
    Table,
    Id,
    LevelId,
    Title,
    Amount,
    Occurrences,
    EveryMonth,
    CompanyId,
    Status,
    CreatedAt,
    UpdatedAt,
}
