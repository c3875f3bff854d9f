//! Test doubles shared by the service unit tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::domain::{
    AcademicYear, Course, Department, FacultyPosition, FacultyProfile, Lifecycle, RecordStatus,
    StudentProfile, StudentStatus,
};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{
    MockAcademicYearRepository, MockCourseRepository, MockDepartmentRepository,
    MockFacultyRepository, MockStudentRepository,
};
use crate::infra::{
    AcademicYearRepository, CourseRepository, DepartmentRepository, FacultyRepository,
    StudentRepository, TransactionContext, UnitOfWork,
};

/// Unit of Work over mock repositories. Transactions are not supported.
#[derive(Default)]
pub(crate) struct TestUnitOfWork {
    pub departments: MockDepartmentRepository,
    pub courses: MockCourseRepository,
    pub academic_years: MockAcademicYearRepository,
    pub students: MockStudentRepository,
    pub faculty: MockFacultyRepository,
}

/// Frozen form handed to services
pub(crate) struct FrozenUnitOfWork {
    departments: Arc<MockDepartmentRepository>,
    courses: Arc<MockCourseRepository>,
    academic_years: Arc<MockAcademicYearRepository>,
    students: Arc<MockStudentRepository>,
    faculty: Arc<MockFacultyRepository>,
}

impl TestUnitOfWork {
    pub(crate) fn build(self) -> Arc<FrozenUnitOfWork> {
        Arc::new(FrozenUnitOfWork {
            departments: Arc::new(self.departments),
            courses: Arc::new(self.courses),
            academic_years: Arc::new(self.academic_years),
            students: Arc::new(self.students),
            faculty: Arc::new(self.faculty),
        })
    }
}

#[async_trait]
impl UnitOfWork for FrozenUnitOfWork {
    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.departments.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.courses.clone()
    }

    fn academic_years(&self) -> Arc<dyn AcademicYearRepository> {
        self.academic_years.clone()
    }

    fn students(&self) -> Arc<dyn StudentRepository> {
        self.students.clone()
    }

    fn faculty(&self) -> Arc<dyn FacultyRepository> {
        self.faculty.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub(crate) fn department(id: i32) -> Department {
    Department {
        id,
        name: format!("Department {}", id),
        department_head_id: None,
        lock_version: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        lifecycle: Lifecycle::Active,
    }
}

pub(crate) fn course(id: i32, department_id: Option<i32>) -> Course {
    Course {
        id,
        name: format!("Course {}", id),
        status: RecordStatus::Active,
        department_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        lifecycle: Lifecycle::Active,
    }
}

pub(crate) fn academic_year(id: i32) -> AcademicYear {
    AcademicYear {
        id,
        school_year: "2024-2025".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        lifecycle: Lifecycle::Active,
    }
}

pub(crate) fn student(id: i32, last_name: &str) -> StudentProfile {
    StudentProfile {
        id,
        student_number: format!("2024-{:05}", id),
        first_name: "Test".to_string(),
        middle_name: None,
        last_name: last_name.to_string(),
        status: StudentStatus::Active,
        department_id: None,
        course_id: None,
        academic_year_id: None,
        year_level: 1,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        lifecycle: Lifecycle::Active,
    }
}

pub(crate) fn faculty(id: i32, department_id: Option<i32>, position: FacultyPosition) -> FacultyProfile {
    FacultyProfile {
        id,
        first_name: "Test".to_string(),
        middle_name: None,
        last_name: format!("Faculty{}", id),
        email: format!("faculty{}@school.edu", id),
        position,
        status: RecordStatus::Active,
        department_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        lifecycle: Lifecycle::Active,
    }
}

pub(crate) fn archived() -> Lifecycle {
    Lifecycle::Archived { since: Utc::now() }
}
