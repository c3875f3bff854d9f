//! Student handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};

use super::{lifecycle_response, LookupQuery};
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateStudent, StudentFilter, LifecycleOutcome, StudentProfile, UpdateStudent};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};

/// Create student routes
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/:id",
            get(get_student).put(update_student).delete(archive_student),
        )
        .route("/:id/restore", post(restore_student))
        .route("/:id/permanent", delete(destroy_student))
}

/// List students matching every given filter
#[utoipa::path(
    get,
    path = "/students",
    tag = "Students",
    params(StudentFilter, PaginationParams),
    responses(
        (status = 200, description = "Page of students with pagination metadata", body = Vec<StudentProfile>)
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    Query(filter): Query<StudentFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<StudentProfile>>> {
    let students = state.student_service.list(filter, page).await?;
    Ok(Json(students))
}

/// Create a student
#[utoipa::path(
    post,
    path = "/students",
    tag = "Students",
    request_body = CreateStudent,
    responses(
        (status = 201, description = "Student created", body = StudentProfile),
        (status = 400, description = "Validation error or unknown reference"),
        (status = 409, description = "Student number already exists")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateStudent>,
) -> AppResult<Created<StudentProfile>> {
    let student = state.student_service.create(payload).await?;
    Ok(Created(student))
}

/// Get student by ID
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "Students",
    params(
        ("id" = i32, Path, description = "Student ID"),
        LookupQuery
    ),
    responses(
        (status = 200, description = "Student", body = StudentProfile),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(lookup): Query<LookupQuery>,
) -> AppResult<Json<StudentProfile>> {
    let student = state.student_service.get(id, lookup.include_archived).await?;
    Ok(Json(student))
}

/// Update a live student
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = UpdateStudent,
    responses(
        (status = 200, description = "Student updated", body = StudentProfile),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateStudent>,
) -> AppResult<Json<StudentProfile>> {
    let student = state.student_service.update(id, payload).await?;
    Ok(Json(student))
}

/// Archive a student
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student archived, or already archived", body = LifecycleOutcome),
        (status = 404, description = "Student not found")
    )
)]
pub async fn archive_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LifecycleOutcome>>> {
    let outcome = state.student_service.archive(id).await?;
    Ok(lifecycle_response(outcome, "Student"))
}

/// Restore an archived student
#[utoipa::path(
    post,
    path = "/students/{id}/restore",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student restored, or not archived", body = LifecycleOutcome),
        (status = 404, description = "Student not found")
    )
)]
pub async fn restore_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LifecycleOutcome>>> {
    let outcome = state.student_service.restore(id).await?;
    Ok(lifecycle_response(outcome, "Student"))
}

/// Permanently delete a student
#[utoipa::path(
    delete,
    path = "/students/{id}/permanent",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student permanently deleted"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn destroy_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.student_service.destroy(id).await?;
    Ok(Json(ApiResponse::message("Student permanently deleted")))
}
