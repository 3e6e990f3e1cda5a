//! Test utilities for database testing.
//!
//! This module provides utilities for setting up in-memory SQLite databases
//! with migrations applied, plus fixture helpers for companies and levels.

use anyhow::Result;
use backoffice::migration::{Migrator, MigratorTrait};
use backoffice::models::level;
use backoffice::pagination::{PageWindow, paginate};
use backoffice::repositories::{CompanyRepository, CreateCompany};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set, Statement};

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    // SQLite does not enforce our Postgres foreign key semantics; disable FK
    // checks so fixtures can be inserted without satisfying every relation.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = OFF".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Creates a company through the repository and returns its id.
#[allow(dead_code)]
pub async fn create_company(db: &DatabaseConnection, name: &str) -> Result<i32> {
    let slug = name.to_lowercase().replace(' ', "-");
    let repo = CompanyRepository::new(db);
    let company = repo
        .create(CreateCompany {
            name: name.to_string(),
            email: format!("{slug}@example.com"),
            logo: None,
            phone: None,
            website: None,
            status: None,
        })
        .await?;
    Ok(company.id)
}

/// Inserts a level owned by the given company and returns its id.
#[allow(dead_code)]
pub async fn create_level(db: &DatabaseConnection, company_id: i32, title: &str) -> Result<i32> {
    let now = Utc::now();
    let inserted = level::ActiveModel {
        title: Set(title.to_string()),
        company_id: Set(company_id),
        status: Set(1),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(inserted.id)
}

/// Builds a pagination window with the service defaults.
#[allow(dead_code)]
pub fn window(page: u64, limit: u64) -> PageWindow {
    paginate(Some(page), Some(limit), 25, 100)
}
