//! Status and position vocabularies stored as text columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::config::{
    POSITION_DEAN, POSITION_DEPARTMENT_HEAD, POSITION_INSTRUCTOR, POSITION_PART_TIME,
    STATUS_ACTIVE, STATUS_DROPPED, STATUS_GRADUATED, STATUS_INACTIVE,
};
use crate::errors::AppError;

/// Status of courses and faculty members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => STATUS_ACTIVE,
            RecordStatus::Inactive => STATUS_INACTIVE,
        }
    }
}

impl FromStr for RecordStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_ACTIVE => Ok(RecordStatus::Active),
            STATUS_INACTIVE => Ok(RecordStatus::Inactive),
            other => Err(AppError::validation(format!(
                "Invalid status '{}'. Must be 'active' or 'inactive'",
                other
            ))),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enrollment status of a student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
    Dropped,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => STATUS_ACTIVE,
            StudentStatus::Inactive => STATUS_INACTIVE,
            StudentStatus::Graduated => STATUS_GRADUATED,
            StudentStatus::Dropped => STATUS_DROPPED,
        }
    }
}

impl FromStr for StudentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_ACTIVE => Ok(StudentStatus::Active),
            STATUS_INACTIVE => Ok(StudentStatus::Inactive),
            STATUS_GRADUATED => Ok(StudentStatus::Graduated),
            STATUS_DROPPED => Ok(StudentStatus::Dropped),
            other => Err(AppError::validation(format!(
                "Invalid status '{}'. Must be one of active, inactive, graduated, dropped",
                other
            ))),
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Faculty position. At most one `DepartmentHead` per department.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum FacultyPosition {
    Dean,
    #[default]
    Instructor,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Department Head")]
    DepartmentHead,
}

impl FacultyPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacultyPosition::Dean => POSITION_DEAN,
            FacultyPosition::Instructor => POSITION_INSTRUCTOR,
            FacultyPosition::PartTime => POSITION_PART_TIME,
            FacultyPosition::DepartmentHead => POSITION_DEPARTMENT_HEAD,
        }
    }

    pub fn is_head(&self) -> bool {
        matches!(self, FacultyPosition::DepartmentHead)
    }
}

impl FromStr for FacultyPosition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            POSITION_DEAN => Ok(FacultyPosition::Dean),
            POSITION_INSTRUCTOR => Ok(FacultyPosition::Instructor),
            POSITION_PART_TIME => Ok(FacultyPosition::PartTime),
            POSITION_DEPARTMENT_HEAD => Ok(FacultyPosition::DepartmentHead),
            other => Err(AppError::validation(format!(
                "Invalid position '{}'. Must be one of Dean, Instructor, Part-time, Department Head",
                other
            ))),
        }
    }
}

impl fmt::Display for FacultyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_strings_match_stored_values() {
        for position in [
            FacultyPosition::Dean,
            FacultyPosition::Instructor,
            FacultyPosition::PartTime,
            FacultyPosition::DepartmentHead,
        ] {
            assert_eq!(position.as_str().parse::<FacultyPosition>().unwrap(), position);
        }
        assert_eq!(FacultyPosition::PartTime.to_string(), "Part-time");
    }

    #[test]
    fn position_serializes_with_display_names() {
        let json = serde_json::to_string(&FacultyPosition::DepartmentHead).unwrap();
        assert_eq!(json, "\"Department Head\"");

        let parsed: FacultyPosition = serde_json::from_str("\"Part-time\"").unwrap();
        assert_eq!(parsed, FacultyPosition::PartTime);
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = "enrolled".parse::<StudentStatus>().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!("graduated".parse::<RecordStatus>().is_err());
        assert_eq!("dropped".parse::<StudentStatus>().unwrap(), StudentStatus::Dropped);
    }
}
