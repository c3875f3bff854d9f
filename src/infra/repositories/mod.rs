//! Repository layer - Data access abstraction
//!
//! Each record type has a mockable repository trait implemented by a
//! pooled `*Store`, and a `*Query` that runs the same statements on any
//! connection, including an open transaction.

mod academic_year_repository;
mod base;
mod course_repository;
mod department_repository;
pub(crate) mod entities;
mod faculty_repository;
mod student_repository;

pub use academic_year_repository::{AcademicYearQuery, AcademicYearRepository, AcademicYearStore};
pub use course_repository::{CourseQuery, CourseRepository, CourseStore};
pub use department_repository::{DepartmentQuery, DepartmentRepository, DepartmentStore};
pub use faculty_repository::{FacultyQuery, FacultyRepository, FacultyStore};
pub use student_repository::{StudentQuery, StudentRepository, StudentStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use academic_year_repository::MockAcademicYearRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use course_repository::MockCourseRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use department_repository::MockDepartmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use faculty_repository::MockFacultyRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use student_repository::MockStudentRepository;
