//! Level pricing entity model
//!
//! Pricing plans attached to a level. `level_id` must reference a level owned
//! by the same company; soft delete sets status to -2 and keeps the row.

use sea_orm::entity::prelude::*;

use super::company::Entity as Company;
use super::level::Entity as Level;

/// Default lifecycle status for a freshly created pricing plan.
pub const STATUS_DEFAULT: i32 = 2;

/// Sentinel status marking a soft-deleted pricing plan.
pub const STATUS_DELETED: i32 = -2;

/// The full set of status values a pricing plan may carry.
pub const STATUS_VALUES: [i32; 5] = [-2, -1, 0, 1, 2];

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "level_pricings")]
pub struct Model {
    /// Unique identifier for the pricing plan (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Level this plan applies to; must belong to the same company
    pub level_id: i32,

    /// Display title, e.g. "Monthly"
    pub title: String,

    /// Price amount; strictly positive
    pub amount: f64,

    /// Number of payment occurrences; at least 1
    pub occurrences: i32,

    /// Whether the plan repeats monthly (0 or 1)
    pub every_month: i16,

    /// Owning company identifier
    pub company_id: i32,

    /// Lifecycle status in {-2,-1,0,1,2}; -2 marks a soft-deleted row
    pub status: i32,

    /// Timestamp when the pricing plan was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the pricing plan was last updated
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
    #[sea_orm(
        belongs_to = "Level",
        from = "Column::LevelId",
        to = "super::level::Column::Id"
    )]
    Level,
}

impl Related<Company> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<Level> for Entity {
    fn to() -> RelationDef {
        Relation::Level.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
