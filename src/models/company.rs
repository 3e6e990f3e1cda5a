//! Company entity model
//!
//! Companies are the root tenant entities. Every other business table carries
//! a `company_id` pointing here, and a company's own scoped reads filter on
//! its primary key.

use sea_orm::entity::prelude::*;

/// Default lifecycle status for a freshly created company.
pub const STATUS_DEFAULT: i32 = 1;

/// Sentinel status marking a soft-deleted company.
pub const STATUS_DELETED: i32 = -2;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    /// Unique identifier for the company (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name of the company
    pub name: String,

    /// Contact email (unique across companies)
    pub email: String,

    /// Logo URL (optional)
    pub logo: Option<String>,

    /// Contact phone number (optional)
    pub phone: Option<String>,

    /// Website URL (optional)
    pub website: Option<String>,

    /// Lifecycle status; -2 marks a soft-deleted row
    pub status: i32,

    /// Timestamp when the company was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the company was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::level::Entity")]
    Levels,
    #[sea_orm(has_many = "super::school_year::Entity")]
    SchoolYears,
    #[sea_orm(has_many = "super::level_pricing::Entity")]
    LevelPricings,
    #[sea_orm(has_many = "super::planning_session_type::Entity")]
    PlanningSessionTypes,
}

impl Related<super::level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Levels.def()
    }
}

impl Related<super::school_year::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolYears.def()
    }
}

impl Related<super::level_pricing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LevelPricings.def()
    }
}

impl Related<super::planning_session_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlanningSessionTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
