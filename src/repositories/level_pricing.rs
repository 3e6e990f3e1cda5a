//! # Level Pricing Repository
//!
//! Tenant-scoped CRUD for pricing plans. The write path asserts that the
//! referenced level belongs to the caller's company inside the same
//! transaction as the write it protects; soft delete sets status to -2 and
//! keeps the row.

use chrono::Utc;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::error::CoreError;
use crate::models::level_pricing::{self, STATUS_DEFAULT, STATUS_DELETED, STATUS_VALUES};
use crate::models::{LevelPricing, company, level};
use crate::pagination::{PageWindow, Paginated};
use crate::repositories::scoped::{
    CompanyOwned, CompanyScoped, assert_company_owned, ensure_company_scope,
    get_one_scoped_with_related, paged_with_related, scope_filter,
};

/// A pricing plan joined with its owning company.
pub type LevelPricingWithCompany = (level_pricing::Model, Option<company::Model>);

impl CompanyScoped for LevelPricing {
    fn company_column() -> Self::Column {
        level_pricing::Column::CompanyId
    }

    fn deleted_filter() -> Option<SimpleExpr> {
        Some(level_pricing::Column::Status.ne(STATUS_DELETED))
    }
}

impl CompanyOwned for level::Model {
    fn company_id(&self) -> i32 {
        self.company_id
    }
}

/// Request data for creating a new pricing plan
#[derive(Debug, Clone)]
pub struct CreateLevelPricing {
    pub level_id: i32,
    pub title: String,
    pub amount: f64,
    pub occurrences: Option<i32>,
    pub every_month: Option<i16>,
    pub status: Option<i32>,
}

/// A creation payload with all defaults resolved, ready for validation.
#[derive(Debug, Clone)]
struct LevelPricingFields {
    level_id: i32,
    title: String,
    amount: f64,
    occurrences: i32,
    every_month: i16,
    status: i32,
}

impl CreateLevelPricing {
    /// The explicit defaulting stage: resolves every optional field before
    /// cross-field validation runs.
    fn with_defaults(self) -> LevelPricingFields {
        LevelPricingFields {
            level_id: self.level_id,
            title: self.title,
            amount: self.amount,
            occurrences: self.occurrences.unwrap_or(1),
            every_month: self.every_month.unwrap_or(0),
            status: self.status.unwrap_or(STATUS_DEFAULT),
        }
    }
}

impl LevelPricingFields {
    fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        validate_amount(self.amount)?;
        validate_occurrences(self.occurrences)?;
        validate_every_month(self.every_month)?;
        validate_status(self.status)
    }
}

/// Partial update for a pricing plan; absent fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateLevelPricing {
    pub level_id: Option<i32>,
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub occurrences: Option<i32>,
    pub every_month: Option<i16>,
    pub status: Option<i32>,
}

impl UpdateLevelPricing {
    fn validate(&self) -> Result<(), CoreError> {
        if let Some(title) = self.title.as_deref() {
            validate_title(title)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(occurrences) = self.occurrences {
            validate_occurrences(occurrences)?;
        }
        if let Some(every_month) = self.every_month {
            validate_every_month(every_month)?;
        }
        if let Some(status) = self.status {
            validate_status(status)?;
        }
        Ok(())
    }
}

/// List filters for pricing plans
#[derive(Debug, Clone, Default)]
pub struct LevelPricingFilter {
    pub status: Option<i32>,
    pub level_id: Option<i32>,
    /// Contains-match over the title
    pub search: Option<String>,
}

/// Repository for level pricing database operations
pub struct LevelPricingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LevelPricingRepository<'a> {
    /// Create a new LevelPricingRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a pricing plan under the caller's company.
    ///
    /// The level ownership check, the insert, and the relation re-fetch run
    /// in one transaction.
    pub async fn create(
        &self,
        request: CreateLevelPricing,
        company_id: i32,
    ) -> Result<LevelPricingWithCompany, CoreError> {
        ensure_company_scope(company_id)?;

        let fields = request.with_defaults();
        fields.validate()?;

        let created = self
            .db
            .transaction::<_, LevelPricingWithCompany, CoreError>(move |txn| {
                Box::pin(async move {
                    assert_company_owned::<level::Entity, _>(
                        txn,
                        "level",
                        fields.level_id,
                        company_id,
                    )
                    .await?;

                    let now = Utc::now();
                    let active = level_pricing::ActiveModel {
                        level_id: Set(fields.level_id),
                        title: Set(fields.title.trim().to_string()),
                        amount: Set(fields.amount),
                        occurrences: Set(fields.occurrences),
                        every_month: Set(fields.every_month),
                        company_id: Set(company_id),
                        status: Set(fields.status),
                        created_at: Set(now.into()),
                        updated_at: Set(now.into()),
                        ..Default::default()
                    };
                    let inserted = active.insert(txn).await?;

                    get_one_scoped_with_related::<LevelPricing, company::Entity, _>(
                        txn,
                        inserted.id,
                        company_id,
                    )
                    .await?
                    .ok_or(CoreError::NotFound {
                        resource: "level pricing",
                        id: inserted.id,
                    })
                })
            })
            .await?;

        Ok(created)
    }

    /// List pricing plans for the caller's company, newest first
    /// (creation time descending, id descending as tie-break), joined with
    /// the company.
    pub async fn list(
        &self,
        filter: LevelPricingFilter,
        window: &PageWindow,
        company_id: i32,
    ) -> Result<Paginated<LevelPricingWithCompany>, CoreError> {
        ensure_company_scope(company_id)?;

        let mut extra = Condition::all();
        if let Some(status) = filter.status {
            extra = extra.add(level_pricing::Column::Status.eq(status));
        }
        if let Some(level_id) = filter.level_id {
            extra = extra.add(level_pricing::Column::LevelId.eq(level_id));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            extra = extra.add(level_pricing::Column::Title.contains(search));
        }

        let query = LevelPricing::find()
            .filter(scope_filter::<LevelPricing>(company_id, extra))
            .order_by_desc(level_pricing::Column::CreatedAt)
            .order_by_desc(level_pricing::Column::Id);

        let (rows, total) =
            paged_with_related::<LevelPricing, company::Entity, _>(self.db, query, window).await?;
        Ok(Paginated::new(rows, window, total))
    }

    /// Get a pricing plan by id within the caller's scope
    pub async fn get(
        &self,
        id: i32,
        company_id: i32,
    ) -> Result<LevelPricingWithCompany, CoreError> {
        ensure_company_scope(company_id)?;

        get_one_scoped_with_related::<LevelPricing, company::Entity, _>(self.db, id, company_id)
            .await?
            .ok_or(CoreError::NotFound {
                resource: "level pricing",
                id,
            })
    }

    /// Merge the present fields onto the stored pricing plan and save. When
    /// the payload moves the plan to another level, the new level's ownership
    /// is validated first. Returns the freshly re-fetched record with its
    /// company relation.
    pub async fn update(
        &self,
        id: i32,
        company_id: i32,
        update: UpdateLevelPricing,
    ) -> Result<LevelPricingWithCompany, CoreError> {
        ensure_company_scope(company_id)?;
        update.validate()?;

        let updated = self
            .db
            .transaction::<_, LevelPricingWithCompany, CoreError>(move |txn| {
                Box::pin(async move {
                    let (existing, _) = get_one_scoped_with_related::<
                        LevelPricing,
                        company::Entity,
                        _,
                    >(txn, id, company_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        resource: "level pricing",
                        id,
                    })?;

                    // Re-validate ownership only when the reference changes;
                    // an absent level_id keeps the current level.
                    if let Some(level_id) = update.level_id {
                        assert_company_owned::<level::Entity, _>(
                            txn, "level", level_id, company_id,
                        )
                        .await?;
                    }

                    let mut model: level_pricing::ActiveModel = existing.into();
                    if let Some(level_id) = update.level_id {
                        model.level_id = Set(level_id);
                    }
                    if let Some(title) = update.title {
                        model.title = Set(title.trim().to_string());
                    }
                    if let Some(amount) = update.amount {
                        model.amount = Set(amount);
                    }
                    if let Some(occurrences) = update.occurrences {
                        model.occurrences = Set(occurrences);
                    }
                    if let Some(every_month) = update.every_month {
                        model.every_month = Set(every_month);
                    }
                    if let Some(status) = update.status {
                        model.status = Set(status);
                    }
                    // The payload carries no company field; re-assert the
                    // authoritative scope value anyway.
                    model.company_id = Set(company_id);
                    model.updated_at = Set(Utc::now().into());

                    let saved = model.update(txn).await?;

                    get_one_scoped_with_related::<LevelPricing, company::Entity, _>(
                        txn, saved.id, company_id,
                    )
                    .await?
                    .ok_or(CoreError::NotFound {
                        resource: "level pricing",
                        id: saved.id,
                    })
                })
            })
            .await?;

        Ok(updated)
    }

    /// Soft-delete the pricing plan: sets status to -2, keeps the row.
    ///
    /// The scoped lookup excludes soft-deleted rows, so removing an already
    /// removed plan reports NotFound.
    pub async fn remove(&self, id: i32, company_id: i32) -> Result<(), CoreError> {
        ensure_company_scope(company_id)?;

        self.db
            .transaction::<_, (), CoreError>(move |txn| {
                Box::pin(async move {
                    let (existing, _) = get_one_scoped_with_related::<
                        LevelPricing,
                        company::Entity,
                        _,
                    >(txn, id, company_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        resource: "level pricing",
                        id,
                    })?;

                    let mut model: level_pricing::ActiveModel = existing.into();
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

fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::validation("amount must be greater than 0"));
    }
    Ok(())
}

fn validate_occurrences(occurrences: i32) -> Result<(), CoreError> {
    if occurrences < 1 {
        return Err(CoreError::validation("occurrences must be at least 1"));
    }
    Ok(())
}

fn validate_every_month(every_month: i16) -> Result<(), CoreError> {
    if every_month != 0 && every_month != 1 {
        return Err(CoreError::validation("every_month must be 0 or 1"));
    }
    Ok(())
}

fn validate_status(status: i32) -> Result<(), CoreError> {
    if !STATUS_VALUES.contains(&status) {
        return Err(CoreError::validation(format!(
            "status must be one of {STATUS_VALUES:?}"
        )));
    }
    Ok(())
}
