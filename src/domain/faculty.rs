//! Faculty profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::lifecycle::{Lifecycle, Scope};
use super::status::{FacultyPosition, RecordStatus};

/// Faculty profile domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FacultyProfile {
    pub id: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub position: FacultyPosition,
    pub status: RecordStatus,
    pub department_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

impl FacultyProfile {
    pub fn is_head(&self) -> bool {
        self.position.is_head()
    }

    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// Faculty creation data
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFaculty {
    #[validate(length(min = 1, max = 150, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(max = 150, message = "Middle name is too long"))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 150, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "bob@school.edu")]
    pub email: String,
    #[serde(default)]
    pub position: FacultyPosition,
    #[serde(default)]
    pub status: RecordStatus,
    pub department_id: Option<i32>,
}

/// Faculty update data
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFaculty {
    #[validate(length(min = 1, max = 150, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Middle name is too long"))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 150, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub position: Option<FacultyPosition>,
    pub status: Option<RecordStatus>,
    pub department_id: Option<i32>,
}

/// Faculty list and report filters. Present filters are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct FacultyFilter {
    pub department_id: Option<i32>,
    pub position: Option<FacultyPosition>,
    pub status: Option<RecordStatus>,
    #[serde(default)]
    pub scope: Scope,
}
