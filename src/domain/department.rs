//! Department aggregate root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::lifecycle::{Lifecycle, Scope};

/// Department domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Department {
    pub id: i32,
    pub name: String,
    /// Faculty member leading the department (must belong to it)
    pub department_head_id: Option<i32>,
    /// Optimistic concurrency token, bumped on every write
    pub lock_version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

impl Department {
    pub fn is_archived(&self) -> bool {
        self.lifecycle.is_archived()
    }
}

/// Department creation data
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDepartment {
    #[validate(length(min = 1, max = 150, message = "Department name is required"))]
    #[schema(example = "College of Computer Studies")]
    pub name: String,
}

/// Department update data
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartment {
    #[validate(length(min = 1, max = 150, message = "Department name cannot be empty"))]
    pub name: Option<String>,
    /// New head; must be a faculty member of this department
    pub department_head_id: Option<i32>,
}

/// Department list filters
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DepartmentFilter {
    /// Name substring
    pub name: Option<String>,
    #[serde(default)]
    pub scope: Scope,
}

/// Counts of records removed by a department destroy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DestroySummary {
    pub courses: u64,
    pub students: u64,
    pub faculty: u64,
}
