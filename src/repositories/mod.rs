//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM
//! operations for the business entities. Each repository is a thin,
//! resource-specific configuration over the generic tenant-scoped helpers in
//! [`scoped`]: it supplies the field set, defaults, validators, filters, and
//! default ordering; scoping, soft-delete exclusion, pagination, and
//! referential validation are shared.

pub mod company;
pub mod level_pricing;
pub mod planning_session_type;
pub mod school_year;
pub mod scoped;

pub use company::{CompanyFilter, CompanyRepository, CreateCompany, UpdateCompany};
pub use level_pricing::{
    CreateLevelPricing, LevelPricingFilter, LevelPricingRepository, UpdateLevelPricing,
};
pub use planning_session_type::{
    CreatePlanningSessionType, PlanningSessionTypeFilter, PlanningSessionTypeRepository,
    UpdatePlanningSessionType,
};
pub use school_year::{CreateSchoolYear, SchoolYearFilter, SchoolYearRepository, UpdateSchoolYear};
