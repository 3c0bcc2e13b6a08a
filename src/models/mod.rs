//! # Data Models
//!
//! This module contains the SeaORM entities for the HR records schema.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod department;
pub mod employee;
pub mod medical_leave;
pub mod membership;
pub mod team;
pub mod user;

pub use department::Entity as Department;
pub use employee::Entity as Employee;
pub use medical_leave::Entity as MedicalLeave;
pub use membership::Entity as Membership;
pub use team::Entity as Team;
pub use user::Entity as User;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
    /// Configuration profile the process was started with
    #[schema(example = "local")]
    pub profile: String,
}

impl ServiceInfo {
    pub fn new(profile: &str) -> Self {
        Self {
            service: "hr-records".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            profile: profile.to_string(),
        }
    }
}
