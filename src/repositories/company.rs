//! # Company Repository
//!
//! Companies are the root tenant entities, so their scoping is special: a
//! caller only ever sees the company it is authenticated for, and scoped
//! reads filter on the primary key itself. Creation is an operator action
//! that brings a new tenant into existence and therefore takes no scope.

use chrono::Utc;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::error::CoreError;
use crate::models::company::{self, STATUS_DEFAULT, STATUS_DELETED};
use crate::pagination::{PageWindow, Paginated};
use crate::repositories::scoped::{
    CompanyScoped, ensure_company_scope, get_one_scoped, paged, scope_filter,
};

impl CompanyScoped for company::Entity {
    // A company is its own tenant: scope on the primary key.
    fn company_column() -> Self::Column {
        company::Column::Id
    }

    fn deleted_filter() -> Option<SimpleExpr> {
        Some(company::Column::Status.ne(STATUS_DELETED))
    }
}

/// Request data for creating a new company
#[derive(Debug, Clone)]
pub struct CreateCompany {
    pub name: String,
    pub email: String,
    pub logo: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub status: Option<i32>,
}

/// Partial update for a company; absent fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub email: Option<String>,
    pub logo: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub status: Option<i32>,
}

/// List filters for companies
#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    pub status: Option<i32>,
    /// Contains-match over name and email
    pub search: Option<String>,
}

/// Repository for company database operations
pub struct CompanyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CompanyRepository<'a> {
    /// Create a new CompanyRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new company. Unscoped: the created company becomes its own
    /// tenant.
    pub async fn create(&self, request: CreateCompany) -> Result<company::Model, CoreError> {
        validate_name(&request.name)?;
        validate_email(&request.email)?;

        let now = Utc::now();
        let active = company::ActiveModel {
            name: Set(request.name.trim().to_string()),
            email: Set(request.email),
            logo: Set(request.logo),
            phone: Set(request.phone),
            website: Set(request.website),
            status: Set(request.status.unwrap_or(STATUS_DEFAULT)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        Ok(active.insert(self.db).await?)
    }

    /// List companies visible to the caller: only its own, in a paginated
    /// envelope for a uniform list response shape.
    pub async fn list(
        &self,
        filter: CompanyFilter,
        window: &PageWindow,
        company_id: i32,
    ) -> Result<Paginated<company::Model>, CoreError> {
        ensure_company_scope(company_id)?;

        let mut extra = Condition::all();
        if let Some(status) = filter.status {
            extra = extra.add(company::Column::Status.eq(status));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            extra = extra.add(
                Condition::any()
                    .add(company::Column::Name.contains(search))
                    .add(company::Column::Email.contains(search)),
            );
        }

        let query = company::Entity::find()
            .filter(scope_filter::<company::Entity>(company_id, extra))
            .order_by_asc(company::Column::Id);

        let (rows, total) = paged(self.db, query, window).await?;
        Ok(Paginated::new(rows, window, total))
    }

    /// Get the company by id within the caller's scope
    pub async fn get(&self, id: i32, company_id: i32) -> Result<company::Model, CoreError> {
        ensure_company_scope(company_id)?;

        get_one_scoped::<company::Entity, _>(self.db, id, company_id)
            .await?
            .ok_or(CoreError::NotFound {
                resource: "company",
                id,
            })
    }

    /// Merge the present fields onto the stored company and save. Returns the
    /// merged-and-saved instance directly.
    pub async fn update(
        &self,
        id: i32,
        company_id: i32,
        update: UpdateCompany,
    ) -> Result<company::Model, CoreError> {
        ensure_company_scope(company_id)?;

        if let Some(name) = update.name.as_deref() {
            validate_name(name)?;
        }
        if let Some(email) = update.email.as_deref() {
            validate_email(email)?;
        }

        let updated = self
            .db
            .transaction::<_, company::Model, CoreError>(move |txn| {
                Box::pin(async move {
                    let existing = get_one_scoped::<company::Entity, _>(txn, id, company_id)
                        .await?
                        .ok_or(CoreError::NotFound {
                            resource: "company",
                            id,
                        })?;

                    let mut model: company::ActiveModel = existing.into();
                    if let Some(name) = update.name {
                        model.name = Set(name.trim().to_string());
                    }
                    if let Some(email) = update.email {
                        model.email = Set(email);
                    }
                    if let Some(logo) = update.logo {
                        model.logo = Set(Some(logo));
                    }
                    if let Some(phone) = update.phone {
                        model.phone = Set(Some(phone));
                    }
                    if let Some(website) = update.website {
                        model.website = Set(Some(website));
                    }
                    if let Some(status) = update.status {
                        model.status = Set(status);
                    }
                    model.updated_at = Set(Utc::now().into());

                    Ok(model.update(txn).await?)
                })
            })
            .await?;

        Ok(updated)
    }

    /// Soft-delete the company: sets the deleted sentinel, keeps the row.
    pub async fn remove(&self, id: i32, company_id: i32) -> Result<(), CoreError> {
        ensure_company_scope(company_id)?;

        self.db
            .transaction::<_, (), CoreError>(move |txn| {
                Box::pin(async move {
                    let existing = get_one_scoped::<company::Entity, _>(txn, id, company_id)
                        .await?
                        .ok_or(CoreError::NotFound {
                            resource: "company",
                            id,
                        })?;

                    let mut model: company::ActiveModel = existing.into();
                    model.status = Set(STATUS_DELETED);
                    model.updated_at = Set(Utc::now().into());
                    model.update(txn).await?;
                    Ok(())
                })
            })
            .await?;

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::validation("company name cannot be empty"));
    }
    if name.len() > 255 {
        return Err(CoreError::validation(
            "company name cannot exceed 255 characters",
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), CoreError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(CoreError::validation(format!(
            "invalid email address: {email}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_oversized_names_are_rejected() {
        assert!(validate_name("  ").is_err());
        assert!(validate_name(&"a".repeat(256)).is_err());
        assert!(validate_name("Acme School").is_ok());
    }

    #[test]
    fn malformed_emails_are_rejected() {
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@missing-local").is_err());
        assert!(validate_email("missing-domain@").is_err());
        assert!(validate_email("admin@acme.edu").is_ok());
    }
}
