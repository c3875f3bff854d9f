//! Spreadsheet sync handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::post,
    Router,
};

use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{ExportSummary, ImportSummary, SheetEntity};

/// Create sync routes
pub fn sync_routes() -> Router<AppState> {
    Router::new()
        .route("/:entity/export", post(export_sheet))
        .route("/:entity/import", post(import_sheet))
}

/// Overwrite an entity's sheet with every stored record
#[utoipa::path(
    post,
    path = "/sync/{entity}/export",
    tag = "Sync",
    params(("entity" = String, Path, description = "departments, courses, academic-years, students or faculty")),
    responses(
        (status = 200, description = "Rows written", body = ExportSummary),
        (status = 400, description = "Unknown entity"),
        (status = 502, description = "Spreadsheet backend failed")
    )
)]
pub async fn export_sheet(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> AppResult<Json<ExportSummary>> {
    let entity: SheetEntity = entity.parse()?;
    let summary = state.sync_service.export(entity).await?;
    Ok(Json(summary))
}

/// Upsert an entity's records from its sheet
#[utoipa::path(
    post,
    path = "/sync/{entity}/import",
    tag = "Sync",
    params(("entity" = String, Path, description = "departments, courses, academic-years, students or faculty")),
    responses(
        (status = 200, description = "Rows created and updated", body = ImportSummary),
        (status = 400, description = "Unknown entity or malformed row"),
        (status = 502, description = "Spreadsheet backend failed")
    )
)]
pub async fn import_sheet(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> AppResult<Json<ImportSummary>> {
    let entity: SheetEntity = entity.parse()?;
    let summary = state.sync_service.import(entity).await?;
    Ok(Json(summary))
}
