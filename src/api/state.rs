//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AcademicYearService, CourseService, DepartmentService, FacultyService, ReportService,
    ServiceContainer, Services, StudentService, SyncService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub department_service: Arc<dyn DepartmentService>,
    pub course_service: Arc<dyn CourseService>,
    pub academic_year_service: Arc<dyn AcademicYearService>,
    pub student_service: Arc<dyn StudentService>,
    pub faculty_service: Arc<dyn FacultyService>,
    pub report_service: Arc<dyn ReportService>,
    pub sync_service: Arc<dyn SyncService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(database, &container)
    }

    /// Create application state from an already wired container.
    pub fn from_container(database: Arc<Database>, container: &dyn ServiceContainer) -> Self {
        Self {
            department_service: container.departments(),
            course_service: container.courses(),
            academic_year_service: container.academic_years(),
            student_service: container.students(),
            faculty_service: container.faculty(),
            report_service: container.reports(),
            sync_service: container.sync(),
            database,
        }
    }
}
