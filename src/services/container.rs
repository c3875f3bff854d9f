//! Service Container - Centralized service access.
//!
//! Wires every service over one shared Unit of Work, and registers the
//! department head reconciler on the faculty event bus.

use std::future::Future;
use std::sync::Arc;

use super::{
    AcademicYearManager, AcademicYearService, CourseManager, CourseService, DepartmentManager,
    DepartmentService, EventBus, FacultyManager, FacultyService, HeadReconciler, ReportManager,
    ReportService, StudentManager, StudentService, SyncManager, SyncService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{CsvDocumentRenderer, CsvSpreadsheet, Persistence, SpreadsheetConnector};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn departments(&self) -> Arc<dyn DepartmentService>;

    fn courses(&self) -> Arc<dyn CourseService>;

    fn academic_years(&self) -> Arc<dyn AcademicYearService>;

    fn students(&self) -> Arc<dyn StudentService>;

    fn faculty(&self) -> Arc<dyn FacultyService>;

    fn reports(&self) -> Arc<dyn ReportService>;

    fn sync(&self) -> Arc<dyn SyncService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    department_service: Arc<dyn DepartmentService>,
    course_service: Arc<dyn CourseService>,
    academic_year_service: Arc<dyn AcademicYearService>,
    student_service: Arc<dyn StudentService>,
    faculty_service: Arc<dyn FacultyService>,
    report_service: Arc<dyn ReportService>,
    sync_service: Arc<dyn SyncService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let connector = Arc::new(CsvSpreadsheet::new(config.sheets_dir.clone()));
        Self::with_connector(db, connector)
    }

    /// Same as `from_connection` with a caller-supplied spreadsheet connector
    pub fn with_connector(
        db: sea_orm::DatabaseConnection,
        connector: Arc<dyn SpreadsheetConnector>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let events = EventBus::new().with_handler(Arc::new(HeadReconciler::new(uow.clone())));

        Self {
            department_service: Arc::new(DepartmentManager::new(uow.clone())),
            course_service: Arc::new(CourseManager::new(uow.clone())),
            academic_year_service: Arc::new(AcademicYearManager::new(uow.clone())),
            student_service: Arc::new(StudentManager::new(uow.clone())),
            faculty_service: Arc::new(FacultyManager::new(uow.clone(), events)),
            report_service: Arc::new(ReportManager::new(
                uow.clone(),
                Arc::new(CsvDocumentRenderer::new()),
            )),
            sync_service: Arc::new(SyncManager::new(uow, connector)),
        }
    }
}

impl ServiceContainer for Services {
    fn departments(&self) -> Arc<dyn DepartmentService> {
        self.department_service.clone()
    }

    fn courses(&self) -> Arc<dyn CourseService> {
        self.course_service.clone()
    }

    fn academic_years(&self) -> Arc<dyn AcademicYearService> {
        self.academic_year_service.clone()
    }

    fn students(&self) -> Arc<dyn StudentService> {
        self.student_service.clone()
    }

    fn faculty(&self) -> Arc<dyn FacultyService> {
        self.faculty_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }

    fn sync(&self) -> Arc<dyn SyncService> {
        self.sync_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// If either operation fails, the error is returned immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute three independent async operations in parallel.
    ///
    /// # Example
    /// ```ignore
    /// let (course, department, year) = parallel::join3(
    ///     courses.find_by_id(course_id, Scope::All),
    ///     departments.find_by_id(department_id, Scope::All),
    ///     academic_years.find_by_id(year_id, Scope::All),
    /// ).await?;
    /// ```
    pub async fn join3<F1, F2, F3, T1, T2, T3>(
        f1: F1,
        f2: F2,
        f3: F3,
    ) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[tokio::test]
    async fn test_parallel_join2() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<&'static str> {
            Ok("two")
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, "two");
    }

    #[tokio::test]
    async fn test_parallel_join3_short_circuits_on_error() {
        let result = parallel::join3(
            async { Ok::<_, AppError>(1) },
            async { Err::<i32, _>(AppError::NotFound) },
            async { Ok::<_, AppError>(3) },
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
