//! Database migrations for the back-office API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_06_01_000001_create_companies;
mod m2026_06_01_000002_create_levels;
mod m2026_06_01_000003_create_school_years;
mod m2026_06_01_000004_create_level_pricings;
mod m2026_06_01_000005_create_planning_session_types;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_06_01_000001_create_companies::Migration),
            Box::new(m2026_06_01_000002_create_levels::Migration),
            Box::new(m2026_06_01_000003_create_school_years::Migration),
            Box::new(m2026_06_01_000004_create_level_pricings::Migration),
            Box::new(m2026_06_01_000005_create_planning_session_types::Migration),
        ]
    }
}
