//! Report command - renders a report into the reports directory.

use std::path::Path;

use crate::cli::args::{ReportArgs, ReportKind};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::RenderedDocument;
use crate::services::{FacultyReportFilter, ServiceContainer, StudentReportFilter};

use super::connect_services;

/// Execute the report command
pub async fn execute(args: ReportArgs, config: Config) -> AppResult<()> {
    let services = connect_services(&config).await?;
    let reports = services.reports();

    let document = match args.kind {
        ReportKind::Students {
            course,
            department,
            academic_year,
            status,
        } => {
            let filter = StudentReportFilter {
                course_id: course,
                department_id: department,
                academic_year_id: academic_year,
                status,
            };
            reports.render_students(filter).await?
        }
        ReportKind::Faculty { department } => {
            let filter = FacultyReportFilter {
                department_id: department,
            };
            reports.render_faculty(filter).await?
        }
    };

    let dir = args.output.unwrap_or(config.reports_dir);
    let path = write_document(&dir, &document).await?;
    println!("Report written to {}", path);

    Ok(())
}

async fn write_document(dir: &Path, document: &RenderedDocument) -> AppResult<String> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::internal(format!("Cannot create {}: {}", dir.display(), e)))?;

    let path = dir.join(&document.filename);
    tokio::fs::write(&path, &document.bytes)
        .await
        .map_err(|e| AppError::internal(format!("Cannot write {}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), bytes = document.bytes.len(), "Report written");
    Ok(path.display().to_string())
}
