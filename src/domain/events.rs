//! Domain events published after a primary write commits.

use super::status::FacultyPosition;

/// Facts about faculty records that downstream handlers react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    /// A faculty member was created or updated.
    ///
    /// `previous_*` are `None` on create.
    FacultyPositionChanged {
        faculty_id: i32,
        department_id: Option<i32>,
        position: FacultyPosition,
        previous_department_id: Option<i32>,
        previous_position: Option<FacultyPosition>,
    },
    /// A faculty member was fetched; handlers may re-assert invariants.
    FacultyViewed {
        faculty_id: i32,
        department_id: Option<i32>,
        position: FacultyPosition,
    },
    /// A faculty member was soft-archived.
    FacultyArchived {
        faculty_id: i32,
        department_id: Option<i32>,
    },
}

impl DomainEvent {
    /// Event name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::FacultyPositionChanged { .. } => "FacultyPositionChanged",
            DomainEvent::FacultyViewed { .. } => "FacultyViewed",
            DomainEvent::FacultyArchived { .. } => "FacultyArchived",
        }
    }

    pub fn faculty_id(&self) -> i32 {
        match self {
            DomainEvent::FacultyPositionChanged { faculty_id, .. }
            | DomainEvent::FacultyViewed { faculty_id, .. }
            | DomainEvent::FacultyArchived { faculty_id, .. } => *faculty_id,
        }
    }
}
