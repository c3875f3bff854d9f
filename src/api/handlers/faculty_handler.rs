//! Faculty handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};

use super::{lifecycle_response, LookupQuery};
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateFaculty, FacultyFilter, LifecycleOutcome, FacultyProfile, UpdateFaculty};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};

/// Create faculty member routes
pub fn faculty_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_faculty_members).post(create_faculty))
        .route(
            "/:id",
            get(get_faculty).put(update_faculty).delete(archive_faculty),
        )
        .route("/:id/restore", post(restore_faculty))
        .route("/:id/permanent", delete(destroy_faculty))
}

/// List faculty, optionally by department, position and status
#[utoipa::path(
    get,
    path = "/faculty",
    tag = "Faculty",
    params(FacultyFilter, PaginationParams),
    responses(
        (status = 200, description = "Page of faculty with pagination metadata", body = Vec<FacultyProfile>)
    )
)]
pub async fn list_faculty_members(
    State(state): State<AppState>,
    Query(filter): Query<FacultyFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<FacultyProfile>>> {
    let faculty_members = state.faculty_service.list(filter, page).await?;
    Ok(Json(faculty_members))
}

/// Create a faculty member
#[utoipa::path(
    post,
    path = "/faculty",
    tag = "Faculty",
    request_body = CreateFaculty,
    responses(
        (status = 201, description = "Faculty created", body = FacultyProfile),
        (status = 400, description = "Validation error or unknown reference"),
        (status = 409, description = "Faculty email already exists")
    )
)]
pub async fn create_faculty(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateFaculty>,
) -> AppResult<Created<FacultyProfile>> {
    let faculty = state.faculty_service.create(payload).await?;
    Ok(Created(faculty))
}

/// Get faculty member by ID
#[utoipa::path(
    get,
    path = "/faculty/{id}",
    tag = "Faculty",
    params(
        ("id" = i32, Path, description = "Faculty ID"),
        LookupQuery
    ),
    responses(
        (status = 200, description = "Faculty", body = FacultyProfile),
        (status = 404, description = "Faculty not found")
    )
)]
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(lookup): Query<LookupQuery>,
) -> AppResult<Json<FacultyProfile>> {
    let faculty = state.faculty_service.get(id, lookup.include_archived).await?;
    Ok(Json(faculty))
}

/// Update a live faculty member
#[utoipa::path(
    put,
    path = "/faculty/{id}",
    tag = "Faculty",
    params(("id" = i32, Path, description = "Faculty ID")),
    request_body = UpdateFaculty,
    responses(
        (status = 200, description = "Faculty updated", body = FacultyProfile),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Faculty not found")
    )
)]
pub async fn update_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateFaculty>,
) -> AppResult<Json<FacultyProfile>> {
    let faculty = state.faculty_service.update(id, payload).await?;
    Ok(Json(faculty))
}

/// Archive a faculty member
#[utoipa::path(
    delete,
    path = "/faculty/{id}",
    tag = "Faculty",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty archived, or already archived", body = LifecycleOutcome),
        (status = 404, description = "Faculty not found")
    )
)]
pub async fn archive_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LifecycleOutcome>>> {
    let outcome = state.faculty_service.archive(id).await?;
    Ok(lifecycle_response(outcome, "Faculty"))
}

/// Restore an archived faculty member
#[utoipa::path(
    post,
    path = "/faculty/{id}/restore",
    tag = "Faculty",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty restored, or not archived", body = LifecycleOutcome),
        (status = 404, description = "Faculty not found")
    )
)]
pub async fn restore_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LifecycleOutcome>>> {
    let outcome = state.faculty_service.restore(id).await?;
    Ok(lifecycle_response(outcome, "Faculty"))
}

/// Permanently delete a faculty member, clearing any head reference
#[utoipa::path(
    delete,
    path = "/faculty/{id}/permanent",
    tag = "Faculty",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty permanently deleted"),
        (status = 404, description = "Faculty not found")
    )
)]
pub async fn destroy_faculty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.faculty_service.destroy(id).await?;
    Ok(Json(ApiResponse::message("Faculty permanently deleted")))
}
