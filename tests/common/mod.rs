//! Shared fixtures for integration tests.
//!
//! Every test gets its own migrated in-memory SQLite database and a
//! temporary directory backing the CSV spreadsheet.

#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use school_records::domain::{
    AcademicYear, Course, CreateAcademicYear, CreateCourse, CreateDepartment, CreateFaculty,
    CreateStudent, Department, FacultyPosition, FacultyProfile, RecordStatus, StudentProfile,
    StudentStatus,
};
use school_records::infra::{CsvSpreadsheet, Database};
use school_records::services::{ServiceContainer, Services};

pub struct TestApp {
    pub database: Arc<Database>,
    pub services: Services,
    pub sheets: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let database = Arc::new(Database::in_memory().await.expect("in-memory database"));
        let sheets = tempfile::tempdir().expect("sheets dir");
        let connector = Arc::new(CsvSpreadsheet::new(sheets.path()));
        let services = Services::with_connector(database.get_connection(), connector);

        Self {
            database,
            services,
            sheets,
        }
    }

    pub async fn department(&self, name: &str) -> Department {
        self.services
            .departments()
            .create(CreateDepartment {
                name: name.to_string(),
            })
            .await
            .expect("create department")
    }

    pub async fn course(&self, department_id: i32, name: &str) -> Course {
        self.services
            .courses()
            .create(CreateCourse {
                name: name.to_string(),
                status: RecordStatus::Active,
                department_id: Some(department_id),
            })
            .await
            .expect("create course")
    }

    pub async fn academic_year(&self, label: &str) -> AcademicYear {
        self.services
            .academic_years()
            .create(CreateAcademicYear {
                school_year: label.to_string(),
            })
            .await
            .expect("create academic year")
    }

    pub async fn student(
        &self,
        number: &str,
        last_name: &str,
        department_id: i32,
        course_id: i32,
    ) -> StudentProfile {
        self.services
            .students()
            .create(CreateStudent {
                student_number: number.to_string(),
                first_name: "Test".to_string(),
                middle_name: None,
                last_name: last_name.to_string(),
                status: StudentStatus::Active,
                department_id: Some(department_id),
                course_id: Some(course_id),
                academic_year_id: None,
                year_level: 1,
            })
            .await
            .expect("create student")
    }

    pub async fn faculty(
        &self,
        first_name: &str,
        department_id: i32,
        position: FacultyPosition,
    ) -> FacultyProfile {
        self.services
            .faculty()
            .create(CreateFaculty {
                first_name: first_name.to_string(),
                middle_name: None,
                last_name: "Faculty".to_string(),
                email: format!("{}@school.edu", first_name.to_lowercase()),
                position,
                status: RecordStatus::Active,
                department_id: Some(department_id),
            })
            .await
            .expect("create faculty")
    }
}
