//! School year entity model
//!
//! Invariant: `end_date` is strictly after `start_date`; the repository
//! rejects violating writes before they reach the store.

use sea_orm::entity::prelude::*;

use super::company::Entity as Company;

/// Default lifecycle status for a freshly created school year.
pub const STATUS_DEFAULT: i32 = 1;

/// Sentinel status marking a soft-deleted school year.
pub const STATUS_DELETED: i32 = -2;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "school_years")]
pub struct Model {
    /// Unique identifier for the school year (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display title, e.g. "2026/2027"
    pub title: String,

    /// First day of the school year
    pub start_date: Date,

    /// Last day of the school year; strictly after `start_date`
    pub end_date: Date,

    /// Lifecycle status; -2 marks a soft-deleted row
    pub status: i32,

    /// Owning company identifier
    pub company_id: i32,

    /// Timestamp when the school year was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the school year was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Company",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
}

impl Related<Company> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
