//! Course handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};

use super::{lifecycle_response, LookupQuery};
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateCourse, CourseFilter, LifecycleOutcome, Course, UpdateCourse};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};

/// Create course routes
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/:id",
            get(get_course).put(update_course).delete(archive_course),
        )
        .route("/:id/restore", post(restore_course))
        .route("/:id/permanent", delete(destroy_course))
}

/// List courses, optionally by department and status
#[utoipa::path(
    get,
    path = "/courses",
    tag = "Courses",
    params(CourseFilter, PaginationParams),
    responses(
        (status = 200, description = "Page of courses with pagination metadata", body = Vec<Course>)
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Course>>> {
    let courses = state.course_service.list(filter, page).await?;
    Ok(Json(courses))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/courses",
    tag = "Courses",
    request_body = CreateCourse,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation error or unknown reference"),
        (status = 409, description = "Course name already exists")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCourse>,
) -> AppResult<Created<Course>> {
    let course = state.course_service.create(payload).await?;
    Ok(Created(course))
}

/// Get course by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "Courses",
    params(
        ("id" = i32, Path, description = "Course ID"),
        LookupQuery
    ),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(lookup): Query<LookupQuery>,
) -> AppResult<Json<Course>> {
    let course = state.course_service.get(id, lookup.include_archived).await?;
    Ok(Json(course))
}

/// Update a live course
#[utoipa::path(
    put,
    path = "/courses/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course ID")),
    request_body = UpdateCourse,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCourse>,
) -> AppResult<Json<Course>> {
    let course = state.course_service.update(id, payload).await?;
    Ok(Json(course))
}

/// Archive a course
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course archived, or already archived", body = LifecycleOutcome),
        (status = 404, description = "Course not found")
    )
)]
pub async fn archive_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LifecycleOutcome>>> {
    let outcome = state.course_service.archive(id).await?;
    Ok(lifecycle_response(outcome, "Course"))
}

/// Restore an archived course
#[utoipa::path(
    post,
    path = "/courses/{id}/restore",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course restored, or not archived", body = LifecycleOutcome),
        (status = 404, description = "Course not found")
    )
)]
pub async fn restore_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LifecycleOutcome>>> {
    let outcome = state.course_service.restore(id).await?;
    Ok(lifecycle_response(outcome, "Course"))
}

/// Permanently delete a course; enrolled students keep their record
#[utoipa::path(
    delete,
    path = "/courses/{id}/permanent",
    tag = "Courses",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course permanently deleted"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn destroy_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.course_service.destroy(id).await?;
    Ok(Json(ApiResponse::message("Course permanently deleted")))
}
