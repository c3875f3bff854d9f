//! Academic year entity.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::lifecycle::{Lifecycle, Scope};

static SCHOOL_YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("school year pattern is valid"));

/// Academic year domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AcademicYear {
    pub id: i32,
    /// Label such as "2024-2025"
    pub school_year: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lifecycle: Lifecycle,
}

/// Academic year creation data
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAcademicYear {
    #[validate(custom(function = "validate_school_year"))]
    #[schema(example = "2024-2025")]
    pub school_year: String,
}

/// Academic year update data
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAcademicYear {
    #[validate(custom(function = "validate_school_year"))]
    pub school_year: Option<String>,
}

/// Academic year list filters
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AcademicYearFilter {
    #[serde(default)]
    pub scope: Scope,
}

/// School years are two consecutive calendar years, e.g. "2024-2025".
pub fn validate_school_year(label: &str) -> Result<(), ValidationError> {
    let consecutive = SCHOOL_YEAR_PATTERN.captures(label).and_then(|caps| {
        let start: i32 = caps[1].parse().ok()?;
        let end: i32 = caps[2].parse().ok()?;
        Some(end == start + 1)
    });

    match consecutive {
        Some(true) => Ok(()),
        _ => {
            let mut err = ValidationError::new("school_year");
            err.message = Some("School year must look like 2024-2025".into());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_consecutive_years() {
        assert!(validate_school_year("2024-2025").is_ok());
    }

    #[test]
    fn rejects_malformed_or_gapped_labels() {
        assert!(validate_school_year("2024-2026").is_err());
        assert!(validate_school_year("2025-2024").is_err());
        assert!(validate_school_year("SY 2024").is_err());
        assert!(validate_school_year("2024/2025").is_err());
    }

    #[test]
    fn create_input_runs_the_custom_rule() {
        let input = CreateAcademicYear {
            school_year: "24-25".to_string(),
        };
        assert!(input.validate().is_err());
    }
}
