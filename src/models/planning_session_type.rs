//! Planning session type entity model
//!
//! Tenant-scoped catalog of planning session types. Status is a textual
//! active/inactive flag and removal is a hard delete.

use sea_orm::entity::prelude::*;

use super::company::Entity as Company;

/// Default status for a freshly created session type.
pub const STATUS_DEFAULT: &str = "active";

/// Allowed status values.
pub const STATUS_VALUES: [&str; 2] = ["active", "inactive"];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "planning_session_types")]
pub struct Model {
    /// Unique identifier for the session type (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display title of the session type
    pub title: String,

    /// Kind of session, e.g. "course" or "exam"
    #[sea_orm(column_name = "type")]
    pub kind: String,

    /// Weighting coefficient (optional)
    pub coefficient: Option<f64>,

    /// Owning company identifier
    pub company_id: i32,

    /// Status flag: "active" or "inactive"
    pub status: String,

    /// Timestamp when the session type was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the session type was last updated
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
