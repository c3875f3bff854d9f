//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Unit of Work for transaction management
//! - Spreadsheet connector and report document renderer

pub mod db;
pub mod renderer;
pub mod repositories;
pub mod sheets;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use renderer::{CsvDocumentRenderer, DocumentRenderer, RenderedDocument, ReportDocument};
pub use repositories::{
    AcademicYearRepository, CourseRepository, DepartmentRepository, FacultyRepository,
    StudentRepository,
};
pub use sheets::{CsvSpreadsheet, SpreadsheetConnector};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use sheets::MockSpreadsheetConnector;
