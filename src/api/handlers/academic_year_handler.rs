//! Academic year handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};

use super::{lifecycle_response, LookupQuery};
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateAcademicYear, AcademicYearFilter, LifecycleOutcome, AcademicYear, UpdateAcademicYear};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};

/// Create academic year routes
pub fn academic_year_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_academic_years).post(create_academic_year))
        .route(
            "/:id",
            get(get_academic_year).put(update_academic_year).delete(archive_academic_year),
        )
        .route("/:id/restore", post(restore_academic_year))
        .route("/:id/permanent", delete(destroy_academic_year))
}

/// List academic years, newest first
#[utoipa::path(
    get,
    path = "/academic-years",
    tag = "Academic Years",
    params(AcademicYearFilter, PaginationParams),
    responses(
        (status = 200, description = "Page of academic years with pagination metadata", body = Vec<AcademicYear>)
    )
)]
pub async fn list_academic_years(
    State(state): State<AppState>,
    Query(filter): Query<AcademicYearFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<AcademicYear>>> {
    let academic_years = state.academic_year_service.list(filter, page).await?;
    Ok(Json(academic_years))
}

/// Create an academic year
#[utoipa::path(
    post,
    path = "/academic-years",
    tag = "Academic Years",
    request_body = CreateAcademicYear,
    responses(
        (status = 201, description = "Academic year created", body = AcademicYear),
        (status = 400, description = "Validation error or unknown reference"),
        (status = 409, description = "School year already exists")
    )
)]
pub async fn create_academic_year(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAcademicYear>,
) -> AppResult<Created<AcademicYear>> {
    let year = state.academic_year_service.create(payload).await?;
    Ok(Created(year))
}

/// Get academic year by ID
#[utoipa::path(
    get,
    path = "/academic-years/{id}",
    tag = "Academic Years",
    params(
        ("id" = i32, Path, description = "Academic year ID"),
        LookupQuery
    ),
    responses(
        (status = 200, description = "Academic year", body = AcademicYear),
        (status = 404, description = "Academic year not found")
    )
)]
pub async fn get_academic_year(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(lookup): Query<LookupQuery>,
) -> AppResult<Json<AcademicYear>> {
    let year = state.academic_year_service.get(id, lookup.include_archived).await?;
    Ok(Json(year))
}

/// Update a live academic year
#[utoipa::path(
    put,
    path = "/academic-years/{id}",
    tag = "Academic Years",
    params(("id" = i32, Path, description = "Academic year ID")),
    request_body = UpdateAcademicYear,
    responses(
        (status = 200, description = "Academic year updated", body = AcademicYear),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Academic year not found")
    )
)]
pub async fn update_academic_year(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateAcademicYear>,
) -> AppResult<Json<AcademicYear>> {
    let year = state.academic_year_service.update(id, payload).await?;
    Ok(Json(year))
}

/// Archive an academic year
#[utoipa::path(
    delete,
    path = "/academic-years/{id}",
    tag = "Academic Years",
    params(("id" = i32, Path, description = "Academic year ID")),
    responses(
        (status = 200, description = "Academic year archived, or already archived", body = LifecycleOutcome),
        (status = 404, description = "Academic year not found")
    )
)]
pub async fn archive_academic_year(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LifecycleOutcome>>> {
    let outcome = state.academic_year_service.archive(id).await?;
    Ok(lifecycle_response(outcome, "Academic year"))
}

/// Restore an archived academic year
#[utoipa::path(
    post,
    path = "/academic-years/{id}/restore",
    tag = "Academic Years",
    params(("id" = i32, Path, description = "Academic year ID")),
    responses(
        (status = 200, description = "Academic year restored, or not archived", body = LifecycleOutcome),
        (status = 404, description = "Academic year not found")
    )
)]
pub async fn restore_academic_year(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LifecycleOutcome>>> {
    let outcome = state.academic_year_service.restore(id).await?;
    Ok(lifecycle_response(outcome, "Academic year"))
}

/// Permanently delete an academic year
#[utoipa::path(
    delete,
    path = "/academic-years/{id}/permanent",
    tag = "Academic Years",
    params(("id" = i32, Path, description = "Academic year ID")),
    responses(
        (status = 200, description = "Academic year permanently deleted"),
        (status = 404, description = "Academic year not found")
    )
)]
pub async fn destroy_academic_year(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.academic_year_service.destroy(id).await?;
    Ok(Json(ApiResponse::message("Academic year permanently deleted")))
}
