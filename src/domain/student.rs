//! Student profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::lifecycle::{Lifecycle, Scope};
use super::status::StudentStatus;

/// Student profile domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentProfile {
    pub id: i32,
    pub student_number: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub status: StudentStatus,
    pub department_id: Option<i32>,
    pub course_id: Option<i32>,
    pub academic_year_id: Option<i32>,
    pub year_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

impl StudentProfile {
    /// "Last, First M." as printed on reports
    pub fn display_name(&self) -> String {
        match self.middle_name.as_deref().and_then(|m| m.chars().next()) {
            Some(initial) => format!("{}, {} {}.", self.last_name, self.first_name, initial),
            None => format!("{}, {}", self.last_name, self.first_name),
        }
    }
}

/// Student creation data
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudent {
    #[validate(length(min = 1, max = 50, message = "Student number is required"))]
    #[schema(example = "2024-00017")]
    pub student_number: String,
    #[validate(length(min = 1, max = 150, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(max = 150, message = "Middle name is too long"))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 150, message = "Last name is required"))]
    pub last_name: String,
    #[serde(default)]
    pub status: StudentStatus,
    pub department_id: Option<i32>,
    pub course_id: Option<i32>,
    pub academic_year_id: Option<i32>,
    #[validate(range(min = 1, max = 6, message = "Year level must be between 1 and 6"))]
    pub year_level: i32,
}

/// Student update data
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudent {
    #[validate(length(min = 1, max = 50, message = "Student number cannot be empty"))]
    pub student_number: Option<String>,
    #[validate(length(min = 1, max = 150, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Middle name is too long"))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 150, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    pub status: Option<StudentStatus>,
    pub department_id: Option<i32>,
    pub course_id: Option<i32>,
    pub academic_year_id: Option<i32>,
    #[validate(range(min = 1, max = 6, message = "Year level must be between 1 and 6"))]
    pub year_level: Option<i32>,
}

/// Student list and report filters. Present filters are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct StudentFilter {
    pub course_id: Option<i32>,
    pub department_id: Option<i32>,
    pub academic_year_id: Option<i32>,
    pub status: Option<StudentStatus>,
    pub year_level: Option<i32>,
    #[serde(default)]
    pub scope: Scope,
}
