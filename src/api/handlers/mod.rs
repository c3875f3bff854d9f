//! HTTP request handlers.

use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::LifecycleOutcome;
use crate::types::ApiResponse;

pub mod academic_year_handler;
pub mod course_handler;
pub mod department_handler;
pub mod faculty_handler;
pub mod report_handler;
pub mod student_handler;
pub mod sync_handler;

pub use academic_year_handler::academic_year_routes;
pub use course_handler::course_routes;
pub use department_handler::department_routes;
pub use faculty_handler::faculty_routes;
pub use report_handler::report_routes;
pub use student_handler::student_routes;
pub use sync_handler::sync_routes;

/// Single-record lookup options
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupQuery {
    /// Also return the record when it is archived
    #[serde(default)]
    pub include_archived: bool,
}

/// Archive/restore outcome with its confirmation message
pub(crate) fn lifecycle_response(
    outcome: LifecycleOutcome,
    entity: &str,
) -> Json<ApiResponse<LifecycleOutcome>> {
    Json(ApiResponse::with_message(outcome, outcome.message(entity)))
}
