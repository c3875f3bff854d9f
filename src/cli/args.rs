//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::StudentStatus;
use crate::services::SheetEntity;

/// School Records - departments, courses, students and faculty administration
#[derive(Parser, Debug)]
#[command(name = "school-records")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Archive, restore or destroy a department with its cascade
    Department(DepartmentArgs),

    /// Export records to or import them from the spreadsheet
    Sheets(SheetsArgs),

    /// Render a student or faculty report
    Report(ReportArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "SERVER_PORT")]
    pub port: u16,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the department command
#[derive(Parser, Debug)]
pub struct DepartmentArgs {
    #[command(subcommand)]
    pub action: DepartmentAction,
}

/// Department lifecycle actions
#[derive(Subcommand, Debug)]
pub enum DepartmentAction {
    /// Archive the department, its courses, faculty and students
    Archive { id: i32 },
    /// Restore an archived department and reverse the cascade
    Restore { id: i32 },
    /// Permanently delete the department and everything under it
    Destroy {
        id: i32,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the sheets command
#[derive(Parser, Debug)]
pub struct SheetsArgs {
    #[command(subcommand)]
    pub action: SheetsAction,
}

/// Spreadsheet sync actions
#[derive(Subcommand, Debug)]
pub enum SheetsAction {
    /// Overwrite sheets with the stored records
    Export(SheetSelection),
    /// Upsert records from sheets
    Import(SheetSelection),
}

/// Which sheets a sync action touches
#[derive(Args, Debug)]
pub struct SheetSelection {
    /// departments, courses, academic-years, students or faculty
    #[arg(required_unless_present = "all")]
    pub entity: Option<SheetEntity>,

    /// Every sheet, departments first
    #[arg(long, conflicts_with = "entity")]
    pub all: bool,
}

impl SheetSelection {
    pub fn entities(&self) -> Vec<SheetEntity> {
        match self.entity {
            Some(entity) if !self.all => vec![entity],
            _ => SheetEntity::ALL.to_vec(),
        }
    }
}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Directory to write the report into (defaults to REPORTS_DIR)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub kind: ReportKind,
}

/// Report kinds
#[derive(Subcommand, Debug)]
pub enum ReportKind {
    /// Students matching every given filter
    Students {
        #[arg(long)]
        course: Option<i32>,
        #[arg(long)]
        department: Option<i32>,
        #[arg(long)]
        academic_year: Option<i32>,
        /// active, inactive, graduated or dropped
        #[arg(long)]
        status: Option<StudentStatus>,
    },
    /// Faculty, optionally limited to one department
    Faculty {
        #[arg(long)]
        department: Option<i32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheets_import_accepts_hyphenated_entity() {
        let cli = Cli::parse_from(["school-records", "sheets", "import", "academic-years"]);
        let Commands::Sheets(args) = cli.command else {
            panic!("expected sheets command");
        };
        let SheetsAction::Import(selection) = args.action else {
            panic!("expected import");
        };
        assert_eq!(selection.entities(), vec![SheetEntity::AcademicYears]);
    }

    #[test]
    fn sheets_export_all_covers_every_entity() {
        let cli = Cli::parse_from(["school-records", "sheets", "export", "--all"]);
        let Commands::Sheets(args) = cli.command else {
            panic!("expected sheets command");
        };
        let SheetsAction::Export(selection) = args.action else {
            panic!("expected export");
        };
        assert_eq!(selection.entities(), SheetEntity::ALL.to_vec());
    }

    #[test]
    fn unknown_sheet_is_rejected() {
        let result = Cli::try_parse_from(["school-records", "sheets", "export", "grades"]);
        assert!(result.is_err());
    }

    #[test]
    fn report_students_parses_filters() {
        let cli = Cli::parse_from([
            "school-records",
            "report",
            "students",
            "--course",
            "3",
            "--status",
            "graduated",
        ]);
        let Commands::Report(args) = cli.command else {
            panic!("expected report command");
        };
        match args.kind {
            ReportKind::Students {
                course,
                department,
                status,
                ..
            } => {
                assert_eq!(course, Some(3));
                assert_eq!(department, None);
                assert_eq!(status, Some(StudentStatus::Graduated));
            }
            other => panic!("unexpected report kind: {:?}", other),
        }
    }
}
