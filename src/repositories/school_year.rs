//! # School Year Repository
//!
//! Tenant-scoped CRUD for school years. The date-range invariant
//! (`end_date > start_date`) is enforced before persistence on create and
//! against the merged values on update; violating inputs are rejected, never
//! silently corrected.

use chrono::Utc;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::prelude::Date;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::error::CoreError;
use crate::models::school_year::{self, STATUS_DEFAULT, STATUS_DELETED};
use crate::models::{company, SchoolYear};
use crate::pagination::{PageWindow, Paginated};
use crate::repositories::scoped::{
    CompanyScoped, ensure_company_scope, get_one_scoped_with_related, paged_with_related,
    scope_filter,
};

/// A school year joined with its owning company.
pub type SchoolYearWithCompany = (school_year::Model, Option<company::Model>);

impl CompanyScoped for SchoolYear {
    fn company_column() -> Self::Column {
        school_year::Column::CompanyId
    }

    fn deleted_filter() -> Option<SimpleExpr> {
        Some(school_year::Column::Status.ne(STATUS_DELETED))
    }
}

/// Request data for creating a new school year
#[derive(Debug, Clone)]
pub struct CreateSchoolYear {
    pub title: String,
    pub start_date: Date,
    pub end_date: Date,
    pub status: Option<i32>,
}

/// Partial update for a school year; absent fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateSchoolYear {
    pub title: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: Option<i32>,
}

/// List filters for school years
#[derive(Debug, Clone, Default)]
pub struct SchoolYearFilter {
    pub status: Option<i32>,
    /// Contains-match over the title
    pub search: Option<String>,
}

/// Repository for school year database operations
pub struct SchoolYearRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SchoolYearRepository<'a> {
    /// Create a new SchoolYearRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a school year under the caller's company, then re-fetch it with
    /// the company relation for a consistent return shape.
    pub async fn create(
        &self,
        request: CreateSchoolYear,
        company_id: i32,
    ) -> Result<SchoolYearWithCompany, CoreError> {
        ensure_company_scope(company_id)?;
        validate_title(&request.title)?;
        validate_date_range(request.start_date, request.end_date)?;

        let now = Utc::now();
        let active = school_year::ActiveModel {
            title: Set(request.title.trim().to_string()),
            start_date: Set(request.start_date),
            end_date: Set(request.end_date),
            status: Set(request.status.unwrap_or(STATUS_DEFAULT)),
            company_id: Set(company_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };
        let created = active.insert(self.db).await?;

        get_one_scoped_with_related::<SchoolYear, company::Entity, _>(
            self.db, created.id, company_id,
        )
        .await?
        .ok_or(CoreError::NotFound {
            resource: "school year",
            id: created.id,
        })
    }

    /// List school years for the caller's company, newest first (id
    /// descending), joined with the company.
    pub async fn list(
        &self,
        filter: SchoolYearFilter,
        window: &PageWindow,
        company_id: i32,
    ) -> Result<Paginated<SchoolYearWithCompany>, CoreError> {
        ensure_company_scope(company_id)?;

        let mut extra = Condition::all();
        if let Some(status) = filter.status {
            extra = extra.add(school_year::Column::Status.eq(status));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            extra = extra.add(school_year::Column::Title.contains(search));
        }

        let query = SchoolYear::find()
            .filter(scope_filter::<SchoolYear>(company_id, extra))
            .order_by_desc(school_year::Column::Id);

        let (rows, total) = paged_with_related::<SchoolYear, company::Entity, _>(
            self.db, query, window,
        )
        .await?;
        Ok(Paginated::new(rows, window, total))
    }

    /// Get a school year by id within the caller's scope
    pub async fn get(&self, id: i32, company_id: i32) -> Result<SchoolYearWithCompany, CoreError> {
        ensure_company_scope(company_id)?;

        get_one_scoped_with_related::<SchoolYear, company::Entity, _>(self.db, id, company_id)
            .await?
            .ok_or(CoreError::NotFound {
                resource: "school year",
                id,
            })
    }

    /// Merge the present fields onto the stored school year and save. The
    /// date-range invariant is re-checked against the merged values before
    /// persistence. Returns the merged-and-saved instance directly, paired
    /// with the company loaded by the scoped fetch.
    pub async fn update(
        &self,
        id: i32,
        company_id: i32,
        update: UpdateSchoolYear,
    ) -> Result<SchoolYearWithCompany, CoreError> {
        ensure_company_scope(company_id)?;

        if let Some(title) = update.title.as_deref() {
            validate_title(title)?;
        }

        let updated = self
            .db
            .transaction::<_, SchoolYearWithCompany, CoreError>(move |txn| {
                Box::pin(async move {
                    let (existing, loaded_company) =
                        get_one_scoped_with_related::<SchoolYear, company::Entity, _>(
                            txn, id, company_id,
                        )
                        .await?
                        .ok_or(CoreError::NotFound {
                            resource: "school year",
                            id,
                        })?;

                    let start = update.start_date.unwrap_or(existing.start_date);
                    let end = update.end_date.unwrap_or(existing.end_date);
                    validate_date_range(start, end)?;

                    let mut model: school_year::ActiveModel = existing.into();
                    if let Some(title) = update.title {
                        model.title = Set(title.trim().to_string());
                    }
                    if let Some(start_date) = update.start_date {
                        model.start_date = Set(start_date);
                    }
                    if let Some(end_date) = update.end_date {
                        model.end_date = Set(end_date);
                    }
                    if let Some(status) = update.status {
                        model.status = Set(status);
                    }
                    // The payload carries no company field; re-assert the
                    // authoritative scope value anyway.
                    model.company_id = Set(company_id);
                    model.updated_at = Set(Utc::now().into());

                    let saved = model.update(txn).await?;
                    Ok((saved, loaded_company))
                })
            })
            .await?;

        Ok(updated)
    }

    /// Soft-delete the school year: sets the deleted sentinel, keeps the row.
    pub async fn remove(&self, id: i32, company_id: i32) -> Result<(), CoreError> {
        ensure_company_scope(company_id)?;

        self.db
            .transaction::<_, (), CoreError>(move |txn| {
                Box::pin(async move {
                    let (existing, _) =
                        get_one_scoped_with_related::<SchoolYear, company::Entity, _>(
                            txn, id, company_id,
                        )
                        .await?
                        .ok_or(CoreError::NotFound {
                            resource: "school year",
                            id,
                        })?;

                    let mut model: school_year::ActiveModel = existing.into();
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

fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::validation("title cannot be empty"));
    }
    if title.len() > 255 {
        return Err(CoreError::validation("title cannot exceed 255 characters"));
    }
    Ok(())
}

fn validate_date_range(start_date: Date, end_date: Date) -> Result<(), CoreError> {
    if end_date <= start_date {
        return Err(CoreError::validation(
            "end_date must be greater than start_date",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = validate_date_range(date(2026, 9, 1), date(2026, 6, 30)).unwrap_err();
        assert!(err.to_string().contains("end_date must be greater"));
    }

    #[test]
    fn equal_dates_are_rejected() {
        assert!(validate_date_range(date(2026, 9, 1), date(2026, 9, 1)).is_err());
    }

    #[test]
    fn valid_range_passes() {
        assert!(validate_date_range(date(2026, 9, 1), date(2027, 6, 30)).is_ok());
    }
}
