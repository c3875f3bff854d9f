//! Department handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};

use super::{lifecycle_response, LookupQuery};
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{
    CreateDepartment, Department, DepartmentFilter, DestroySummary, LifecycleOutcome,
    UpdateDepartment,
};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};

/// Create department routes
pub fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route(
            "/:id",
            get(get_department)
                .put(update_department)
                .delete(archive_department),
        )
        .route("/:id/restore", post(restore_department))
        .route("/:id/permanent", delete(destroy_department))
}

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "Departments",
    params(DepartmentFilter, PaginationParams),
    responses(
        (status = 200, description = "Page of departments with pagination metadata", body = Vec<Department>)
    )
)]
pub async fn list_departments(
    State(state): State<AppState>,
    Query(filter): Query<DepartmentFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Department>>> {
    let departments = state.department_service.list(filter, page).await?;
    Ok(Json(departments))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "Departments",
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Department name already exists")
    )
)]
pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDepartment>,
) -> AppResult<Created<Department>> {
    let department = state.department_service.create(payload).await?;
    Ok(Created(department))
}

/// Get department by ID
#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "Departments",
    params(
        ("id" = i32, Path, description = "Department ID"),
        LookupQuery
    ),
    responses(
        (status = 200, description = "Department", body = Department),
        (status = 404, description = "Department not found")
    )
)]
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(lookup): Query<LookupQuery>,
) -> AppResult<Json<Department>> {
    let department = state
        .department_service
        .get(id, lookup.include_archived)
        .await?;
    Ok(Json(department))
}

/// Update a department, optionally assigning its head
#[utoipa::path(
    put,
    path = "/departments/{id}",
    tag = "Departments",
    params(("id" = i32, Path, description = "Department ID")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 400, description = "Validation error or head outside the department"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    let department = state.department_service.update(id, payload).await?;
    Ok(Json(department))
}

/// Archive a department and cascade to its courses, faculty and students
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "Departments",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department archived, or already archived", body = LifecycleOutcome),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department modified concurrently")
    )
)]
pub async fn archive_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LifecycleOutcome>>> {
    let outcome = state.department_service.archive(id).await?;
    Ok(lifecycle_response(outcome, "Department"))
}

/// Restore an archived department and reverse the cascade
#[utoipa::path(
    post,
    path = "/departments/{id}/restore",
    tag = "Departments",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department restored, or not archived", body = LifecycleOutcome),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department modified concurrently")
    )
)]
pub async fn restore_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LifecycleOutcome>>> {
    let outcome = state.department_service.restore(id).await?;
    Ok(lifecycle_response(outcome, "Department"))
}

/// Permanently delete a department with its courses, students and faculty
#[utoipa::path(
    delete,
    path = "/departments/{id}/permanent",
    tag = "Departments",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department destroyed", body = DestroySummary),
        (status = 404, description = "Department not found")
    )
)]
pub async fn destroy_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<DestroySummary>>> {
    let summary = state.department_service.destroy(id).await?;
    Ok(Json(ApiResponse::with_message(
        summary,
        "Department permanently deleted",
    )))
}
