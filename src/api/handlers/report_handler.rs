//! Report handlers.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::errors::AppResult;
use crate::infra::RenderedDocument;
use crate::services::{FacultyReportFilter, StudentReportFilter};

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(student_report))
        .route("/faculty", get(faculty_report))
}

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: ReportFormat,
}

/// Student report filtered by course, department, academic year and status
#[utoipa::path(
    get,
    path = "/reports/students",
    tag = "Reports",
    params(StudentReportFilter, FormatQuery),
    responses(
        (status = 200, description = "Report rows, or a CSV attachment when format=csv", body = crate::services::StudentReport),
        (status = 404, description = "A filtered record does not exist")
    )
)]
pub async fn student_report(
    State(state): State<AppState>,
    Query(filter): Query<StudentReportFilter>,
    Query(query): Query<FormatQuery>,
) -> AppResult<Response> {
    match query.format {
        ReportFormat::Json => {
            let report = state.report_service.students(filter).await?;
            Ok(Json(report).into_response())
        }
        ReportFormat::Csv => {
            let document = state.report_service.render_students(filter).await?;
            Ok(attachment(document))
        }
    }
}

/// Faculty report, optionally for one department
#[utoipa::path(
    get,
    path = "/reports/faculty",
    tag = "Reports",
    params(FacultyReportFilter, FormatQuery),
    responses(
        (status = 200, description = "Report rows, or a CSV attachment when format=csv", body = crate::services::FacultyReport),
        (status = 404, description = "Department does not exist")
    )
)]
pub async fn faculty_report(
    State(state): State<AppState>,
    Query(filter): Query<FacultyReportFilter>,
    Query(query): Query<FormatQuery>,
) -> AppResult<Response> {
    match query.format {
        ReportFormat::Json => {
            let report = state.report_service.faculty(filter).await?;
            Ok(Json(report).into_response())
        }
        ReportFormat::Csv => {
            let document = state.report_service.render_faculty(filter).await?;
            Ok(attachment(document))
        }
    }
}

fn attachment(document: RenderedDocument) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    (
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response()
}
