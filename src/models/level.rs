//! Level entity model
//!
//! Tenant-scoped school levels. Pricing plans reference this table and the
//! write path asserts that the referenced level belongs to the same company.

use sea_orm::entity::prelude::*;

use super::company::Entity as Company;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "levels")]
pub struct Model {
    /// Unique identifier for the level (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display title of the level
    pub title: String,

    /// Owning company identifier
    pub company_id: i32,

    /// Lifecycle status
    pub status: i32,

    /// Timestamp when the level was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the level was last updated
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
    #[sea_orm(has_many = "super::level_pricing::Entity")]
    LevelPricings,
}

impl Related<Company> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::level_pricing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LevelPricings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
