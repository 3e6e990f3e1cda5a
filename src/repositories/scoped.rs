//! Generic tenant-scoped store operations.
//!
//! Every resource repository is a thin configuration over these helpers: the
//! entity declares its company column and optional soft-delete exclusion
//! through [`CompanyScoped`], and the repository supplies filters, ordering,
//! defaults, and validators. Scoping is enforced by query predicate; a
//! cross-company row is indistinguishable from an absent one.

use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait,
    PrimaryKeyTrait, QueryFilter, QuerySelect, Related, Select,
};

use crate::error::CoreError;
use crate::pagination::PageWindow;

/// Entities partitioned by company.
///
/// `deleted_filter` returns the soft-delete exclusion predicate for entities
/// that mark deletion with a sentinel status; hard-delete entities keep the
/// default `None`.
pub trait CompanyScoped: EntityTrait {
    /// Column holding the owning company id.
    fn company_column() -> Self::Column;

    /// Predicate excluding soft-deleted rows, if the entity soft-deletes.
    fn deleted_filter() -> Option<SimpleExpr> {
        None
    }
}

/// Models that expose their owning company, for referential validation.
pub trait CompanyOwned {
    fn company_id(&self) -> i32;
}

/// Fails fast when the caller context carries no usable company identifier.
///
/// This is a structural check and runs before any store access.
pub fn ensure_company_scope(company_id: i32) -> Result<(), CoreError> {
    if company_id <= 0 {
        return Err(CoreError::MissingCompanyScope);
    }
    Ok(())
}

/// Builds the full scope predicate: company AND soft-delete exclusion AND
/// caller-supplied filters.
pub fn scope_filter<E: CompanyScoped>(company_id: i32, extra: Condition) -> Condition {
    let mut condition = Condition::all()
        .add(E::company_column().eq(company_id))
        .add(extra);
    if let Some(not_deleted) = E::deleted_filter() {
        condition = condition.add(not_deleted);
    }
    condition
}

/// Runs a filtered query through an offset window, returning the page of rows
/// and the total count over the filtered-but-unpaginated set.
pub async fn paged<E, C>(
    conn: &C,
    query: Select<E>,
    window: &PageWindow,
) -> Result<(Vec<E::Model>, u64), CoreError>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
{
    let total = query.clone().count(conn).await?;
    let rows = query
        .offset(window.offset)
        .limit(window.limit)
        .all(conn)
        .await?;
    Ok((rows, total))
}

/// Same as [`paged`] but eagerly joins the declared relation (the owning
/// company, for every resource here).
pub async fn paged_with_related<E, R, C>(
    conn: &C,
    query: Select<E>,
    window: &PageWindow,
) -> Result<(Vec<(E::Model, Option<R::Model>)>, u64), CoreError>
where
    C: ConnectionTrait,
    E: EntityTrait + Related<R>,
    R: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
    R::Model: FromQueryResult + Send + Sync + 'static,
{
    let total = query.clone().count(conn).await?;
    let rows = query
        .find_also_related(R::default())
        .offset(window.offset)
        .limit(window.limit)
        .all(conn)
        .await?;
    Ok((rows, total))
}

/// Scoped point lookup: `id AND company scope AND soft-delete exclusion`.
///
/// This is the only path by which cross-company reads are prevented, so every
/// read, update, and remove goes through it.
pub async fn get_one_scoped<E, C>(
    conn: &C,
    id: i32,
    company_id: i32,
) -> Result<Option<E::Model>, CoreError>
where
    C: ConnectionTrait,
    E: CompanyScoped,
    E::Model: FromQueryResult + Send + Sync + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    Ok(E::find_by_id(id)
        .filter(scope_filter::<E>(company_id, Condition::all()))
        .one(conn)
        .await?)
}

/// Scoped point lookup joining the declared relation.
pub async fn get_one_scoped_with_related<E, R, C>(
    conn: &C,
    id: i32,
    company_id: i32,
) -> Result<Option<(E::Model, Option<R::Model>)>, CoreError>
where
    C: ConnectionTrait,
    E: CompanyScoped + Related<R>,
    R: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
    R::Model: FromQueryResult + Send + Sync + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    Ok(E::find_by_id(id)
        .filter(scope_filter::<E>(company_id, Condition::all()))
        .find_also_related(R::default())
        .one(conn)
        .await?)
}

/// Referential validator: asserts that the referenced row exists and belongs
/// to the caller's company.
///
/// Absent rows and rows owned by another company produce the same validation
/// error; the caller learns nothing about other tenants' data.
pub async fn assert_company_owned<E, C>(
    conn: &C,
    resource: &str,
    id: i32,
    company_id: i32,
) -> Result<(), CoreError>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: CompanyOwned + FromQueryResult + Send + Sync + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    let referenced = E::find_by_id(id).one(conn).await?;
    match referenced {
        Some(row) if row.company_id() == company_id => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "{resource} {id} not found or does not belong to your company"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_company_ids_pass_the_scope_check() {
        assert!(ensure_company_scope(1).is_ok());
        assert!(ensure_company_scope(7).is_ok());
    }

    #[test]
    fn zero_and_negative_company_ids_are_rejected() {
        assert!(matches!(
            ensure_company_scope(0),
            Err(CoreError::MissingCompanyScope)
        ));
        assert!(matches!(
            ensure_company_scope(-3),
            Err(CoreError::MissingCompanyScope)
        ));
    }
}
