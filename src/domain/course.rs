//! Course entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::lifecycle::{Lifecycle, Scope};
use super::status::RecordStatus;

/// Course domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub status: RecordStatus,
    pub department_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

/// Course creation data
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourse {
    #[validate(length(min = 1, max = 150, message = "Course name is required"))]
    #[schema(example = "BS Computer Science")]
    pub name: String,
    #[serde(default)]
    pub status: RecordStatus,
    pub department_id: Option<i32>,
}

/// Course update data
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourse {
    #[validate(length(min = 1, max = 150, message = "Course name cannot be empty"))]
    pub name: Option<String>,
    pub status: Option<RecordStatus>,
    pub department_id: Option<i32>,
}

/// Course list filters
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CourseFilter {
    pub department_id: Option<i32>,
    pub status: Option<RecordStatus>,
    #[serde(default)]
    pub scope: Scope,
}
