//! # Planning Session Type Repository
//!
//! Tenant-scoped CRUD for the planning session type catalog. This resource
//! has no soft-delete sentinel: removal deletes the row permanently.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::error::CoreError;
use crate::models::planning_session_type::{self, STATUS_DEFAULT, STATUS_VALUES};
use crate::models::{PlanningSessionType, company};
use crate::pagination::{PageWindow, Paginated};
use crate::repositories::scoped::{
    CompanyScoped, ensure_company_scope, get_one_scoped_with_related, paged_with_related,
    scope_filter,
};

/// A session type joined with its owning company.
pub type PlanningSessionTypeWithCompany = (planning_session_type::Model, Option<company::Model>);

impl CompanyScoped for PlanningSessionType {
    fn company_column() -> Self::Column {
        planning_session_type::Column::CompanyId
    }
    // No deleted_filter: this catalog hard-deletes.
}

/// Request data for creating a new session type
#[derive(Debug, Clone)]
pub struct CreatePlanningSessionType {
    pub title: String,
    pub kind: String,
    pub coefficient: Option<f64>,
    pub status: Option<String>,
}

/// Partial update for a session type; absent fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct UpdatePlanningSessionType {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub coefficient: Option<f64>,
    pub status: Option<String>,
}

/// List filters for session types
#[derive(Debug, Clone, Default)]
pub struct PlanningSessionTypeFilter {
    pub status: Option<String>,
    pub kind: Option<String>,
    /// Contains-match over the title
    pub search: Option<String>,
}

/// Repository for planning session type database operations
pub struct PlanningSessionTypeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PlanningSessionTypeRepository<'a> {
    /// Create a new PlanningSessionTypeRepository with the given database
    /// connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a session type under the caller's company, then re-fetch it
    /// with the company relation for a consistent return shape.
    pub async fn create(
        &self,
        request: CreatePlanningSessionType,
        company_id: i32,
    ) -> Result<PlanningSessionTypeWithCompany, CoreError> {
        ensure_company_scope(company_id)?;
        validate_title(&request.title)?;
        validate_kind(&request.kind)?;
        let status = request.status.unwrap_or_else(|| STATUS_DEFAULT.to_string());
        validate_status(&status)?;

        let now = Utc::now();
        let active = planning_session_type::ActiveModel {
            title: Set(request.title.trim().to_string()),
            kind: Set(request.kind),
            coefficient: Set(request.coefficient),
            company_id: Set(company_id),
            status: Set(status),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };
        let created = active.insert(self.db).await?;

        get_one_scoped_with_related::<PlanningSessionType, company::Entity, _>(
            self.db, created.id, company_id,
        )
        .await?
        .ok_or(CoreError::NotFound {
            resource: "planning session type",
            id: created.id,
        })
    }

    /// List session types for the caller's company, alphabetically by title
    /// (id ascending as tie-break), joined with the company.
    pub async fn list(
        &self,
        filter: PlanningSessionTypeFilter,
        window: &PageWindow,
        company_id: i32,
    ) -> Result<Paginated<PlanningSessionTypeWithCompany>, CoreError> {
        ensure_company_scope(company_id)?;

        let mut extra = Condition::all();
        if let Some(status) = filter.status.as_deref().filter(|s| !s.is_empty()) {
            extra = extra.add(planning_session_type::Column::Status.eq(status));
        }
        if let Some(kind) = filter.kind.as_deref().filter(|s| !s.is_empty()) {
            extra = extra.add(planning_session_type::Column::Kind.eq(kind));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            extra = extra.add(planning_session_type::Column::Title.contains(search));
        }

        let query = PlanningSessionType::find()
            .filter(scope_filter::<PlanningSessionType>(company_id, extra))
            .order_by_asc(planning_session_type::Column::Title)
            .order_by_asc(planning_session_type::Column::Id);

        let (rows, total) = paged_with_related::<PlanningSessionType, company::Entity, _>(
            self.db, query, window,
        )
        .await?;
        Ok(Paginated::new(rows, window, total))
    }

    /// Get a session type by id within the caller's scope
    pub async fn get(
        &self,
        id: i32,
        company_id: i32,
    ) -> Result<PlanningSessionTypeWithCompany, CoreError> {
        ensure_company_scope(company_id)?;

        get_one_scoped_with_related::<PlanningSessionType, company::Entity, _>(
            self.db, id, company_id,
        )
        .await?
        .ok_or(CoreError::NotFound {
            resource: "planning session type",
            id,
        })
    }

    /// Merge the present fields onto the stored session type and save, then
    /// re-fetch the record with its company relation.
    pub async fn update(
        &self,
        id: i32,
        company_id: i32,
        update: UpdatePlanningSessionType,
    ) -> Result<PlanningSessionTypeWithCompany, CoreError> {
        ensure_company_scope(company_id)?;

        if let Some(title) = update.title.as_deref() {
            validate_title(title)?;
        }
        if let Some(kind) = update.kind.as_deref() {
            validate_kind(kind)?;
        }
        if let Some(status) = update.status.as_deref() {
            validate_status(status)?;
        }

        let updated = self
            .db
            .transaction::<_, PlanningSessionTypeWithCompany, CoreError>(move |txn| {
                Box::pin(async move {
                    let (existing, _) = get_one_scoped_with_related::<
                        PlanningSessionType,
                        company::Entity,
                        _,
                    >(txn, id, company_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        resource: "planning session type",
                        id,
                    })?;

                    let mut model: planning_session_type::ActiveModel = existing.into();
                    if let Some(title) = update.title {
                        model.title = Set(title.trim().to_string());
                    }
                    if let Some(kind) = update.kind {
                        model.kind = Set(kind);
                    }
                    if let Some(coefficient) = update.coefficient {
                        model.coefficient = Set(Some(coefficient));
                    }
                    if let Some(status) = update.status {
                        model.status = Set(status);
                    }
                    // The payload carries no company field; re-assert the
                    // authoritative scope value anyway.
                    model.company_id = Set(company_id);
                    model.updated_at = Set(Utc::now().into());

                    let saved = model.update(txn).await?;

                    get_one_scoped_with_related::<PlanningSessionType, company::Entity, _>(
                        txn, saved.id, company_id,
                    )
                    .await?
                    .ok_or(CoreError::NotFound {
                        resource: "planning session type",
                        id: saved.id,
                    })
                })
            })
            .await?;

        Ok(updated)
    }

    /// Hard-delete the session type: the row is removed permanently.
    pub async fn remove(&self, id: i32, company_id: i32) -> Result<(), CoreError> {
        ensure_company_scope(company_id)?;

        self.db
            .transaction::<_, (), CoreError>(move |txn| {
                Box::pin(async move {
                    let (existing, _) = get_one_scoped_with_related::<
                        PlanningSessionType,
                        company::Entity,
                        _,
                    >(txn, id, company_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        resource: "planning session type",
                        id,
                    })?;

                    existing.delete(txn).await?;
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

fn validate_kind(kind: &str) -> Result<(), CoreError> {
    if kind.trim().is_empty() {
        return Err(CoreError::validation("type cannot be empty"));
    }
    Ok(())
}

fn validate_status(status: &str) -> Result<(), CoreError> {
    if !STATUS_VALUES.contains(&status) {
        return Err(CoreError::validation(format!(
            "status must be one of {STATUS_VALUES:?}"
        )));
    }
    Ok(())
}
