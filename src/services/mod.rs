//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod academic_year_service;
mod cascade;
pub mod container;
mod course_service;
mod department_service;
pub mod events;
mod faculty_service;
mod head_reconciler;
mod lifecycle;
mod references;
mod report_service;
pub mod sheet_rows;
mod student_service;
mod sync_service;

#[cfg(test)]
pub(crate) mod testing;

// Service Container
pub use container::{parallel, ServiceContainer, Services};

// Service traits and implementations
pub use academic_year_service::{AcademicYearManager, AcademicYearService};
pub use cascade::{CascadeCounts, CascadeEngine};
pub use course_service::{CourseManager, CourseService};
pub use department_service::{DepartmentManager, DepartmentService};
pub use faculty_service::{FacultyManager, FacultyService};
pub use report_service::{
    FacultyReport, FacultyReportFilter, FacultyReportRow, ReportManager, ReportService,
    StudentReport, StudentReportFilter, StudentReportLabels, StudentReportRow,
};
pub use student_service::{StudentManager, StudentService};
pub use sync_service::{ExportSummary, ImportSummary, SyncManager, SyncService};

// Events
pub use events::{EventBus, EventHandler};
pub use head_reconciler::HeadReconciler;
pub use sheet_rows::SheetEntity;

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use events::MockEventHandler;
