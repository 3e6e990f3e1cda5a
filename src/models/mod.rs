//! # Data Models
//!
//! This module contains the SeaORM entity models for the back-office API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod company;
pub mod level;
pub mod level_pricing;
pub mod planning_session_type;
pub mod school_year;

pub use company::Entity as Company;
pub use level::Entity as Level;
pub use level_pricing::Entity as LevelPricing;
pub use planning_session_type::Entity as PlanningSessionType;
pub use school_year::Entity as SchoolYear;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "backoffice".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
