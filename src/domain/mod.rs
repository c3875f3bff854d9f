//! Domain layer - Core business entities and logic
//!
//! This module contains the school record models independent of
//! infrastructure concerns: departments, courses, academic years,
//! student and faculty profiles, their lifecycle, and domain events.

pub mod academic_year;
pub mod course;
pub mod department;
pub mod events;
pub mod faculty;
pub mod lifecycle;
pub mod status;
pub mod student;

pub use academic_year::{AcademicYear, AcademicYearFilter, CreateAcademicYear, UpdateAcademicYear};
pub use course::{Course, CourseFilter, CreateCourse, UpdateCourse};
pub use department::{CreateDepartment, Department, DepartmentFilter, DestroySummary, UpdateDepartment};
pub use events::DomainEvent;
pub use faculty::{CreateFaculty, FacultyFilter, FacultyProfile, UpdateFaculty};
pub use lifecycle::{Lifecycle, LifecycleOutcome, Scope};
pub use status::{FacultyPosition, RecordStatus, StudentStatus};
pub use student::{CreateStudent, StudentFilter, StudentProfile, UpdateStudent};
