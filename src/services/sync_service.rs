//! Spreadsheet sync - export and import record collections.
//!
//! Exports write every record, archived included. Imports upsert by id in a
//! single transaction and never change archive state.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use super::head_reconciler::{assign_head, reassert_head};
use super::references::TxReferences;
use super::sheet_rows::{self, DepartmentRecord, SheetEntity, SheetRow};
use crate::domain::{
    CreateAcademicYear, CreateCourse, CreateDepartment, CreateFaculty, CreateStudent, Scope,
    UpdateDepartment,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{SpreadsheetConnector, TransactionContext, UnitOfWork};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ExportSummary {
    pub entity: SheetEntity,
    pub rows: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct ImportCounts {
    pub created: usize,
    pub updated: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ImportSummary {
    pub entity: SheetEntity,
    pub created: usize,
    pub updated: usize,
}

#[async_trait]
pub trait SyncService: Send + Sync {
    /// Write every record of `entity` to its sheet
    async fn export(&self, entity: SheetEntity) -> AppResult<ExportSummary>;

    /// Upsert every row of the sheet by id, all or nothing
    async fn import(&self, entity: SheetEntity) -> AppResult<ImportSummary>;
}

pub struct SyncManager<U: UnitOfWork> {
    uow: Arc<U>,
    connector: Arc<dyn SpreadsheetConnector>,
}

impl<U: UnitOfWork> SyncManager<U> {
    pub fn new(uow: Arc<U>, connector: Arc<dyn SpreadsheetConnector>) -> Self {
        Self { uow, connector }
    }

    async fn export_rows(&self, entity: SheetEntity) -> AppResult<Vec<Vec<String>>> {
        let rows = match entity {
            SheetEntity::Departments => {
                let all = self.uow.departments().list_all().await?;
                all.iter().map(sheet_rows::department_row).collect()
            }
            SheetEntity::Courses => {
                let all = self.uow.courses().list_all().await?;
                all.iter().map(sheet_rows::course_row).collect()
            }
            SheetEntity::AcademicYears => {
                let all = self.uow.academic_years().list_all().await?;
                all.iter().map(sheet_rows::academic_year_row).collect()
            }
            SheetEntity::Students => {
                let all = self.uow.students().list_all().await?;
                all.iter().map(sheet_rows::student_row).collect()
            }
            SheetEntity::Faculty => {
                let all = self.uow.faculty().list_all().await?;
                all.iter().map(sheet_rows::faculty_row).collect()
            }
        };
        Ok(rows)
    }
}

fn parse_all<T>(
    rows: &[Vec<String>],
    parse: fn(usize, &[String]) -> AppResult<SheetRow<T>>,
) -> AppResult<Vec<SheetRow<T>>> {
    rows.iter()
        .enumerate()
        .map(|(index, cells)| parse(index, cells))
        .collect()
}

/// Prefix validation failures with the row they came from
fn at_line<T>(line: usize, result: AppResult<T>) -> AppResult<T> {
    result.map_err(|err| match err {
        AppError::Validation(msg) => AppError::Validation(format!("Row {}: {}", line, msg)),
        other => other,
    })
}

#[async_trait]
impl<U: UnitOfWork> SyncService for SyncManager<U> {
    async fn export(&self, entity: SheetEntity) -> AppResult<ExportSummary> {
        let rows = self.export_rows(entity).await?;
        let count = rows.len();

        self.connector
            .write_rows(entity.sheet(), entity.header(), rows)
            .await?;

        tracing::info!(sheet = entity.sheet(), rows = count, "Sheet exported");
        Ok(ExportSummary {
            entity,
            rows: count,
        })
    }

    async fn import(&self, entity: SheetEntity) -> AppResult<ImportSummary> {
        let rows = self.connector.read_rows(entity.sheet()).await?;

        let counts = match entity {
            SheetEntity::Departments => {
                let parsed = parse_all(&rows, sheet_rows::parse_department)?;
                crate::with_transaction!(self.uow, |ctx| import_departments(&ctx, parsed).await)?
            }
            SheetEntity::Courses => {
                let parsed = parse_all(&rows, sheet_rows::parse_course)?;
                crate::with_transaction!(self.uow, |ctx| import_courses(&ctx, parsed).await)?
            }
            SheetEntity::AcademicYears => {
                let parsed = parse_all(&rows, sheet_rows::parse_academic_year)?;
                crate::with_transaction!(self.uow, |ctx| {
                    import_academic_years(&ctx, parsed).await
                })?
            }
            SheetEntity::Students => {
                let parsed = parse_all(&rows, sheet_rows::parse_student)?;
                crate::with_transaction!(self.uow, |ctx| import_students(&ctx, parsed).await)?
            }
            SheetEntity::Faculty => {
                let parsed = parse_all(&rows, sheet_rows::parse_faculty)?;
                crate::with_transaction!(self.uow, |ctx| import_faculty(&ctx, parsed).await)?
            }
        };

        tracing::info!(
            sheet = entity.sheet(),
            created = counts.created,
            updated = counts.updated,
            "Sheet imported"
        );
        Ok(ImportSummary {
            entity,
            created: counts.created,
            updated: counts.updated,
        })
    }
}

async fn import_departments(
    ctx: &TransactionContext<'_>,
    rows: Vec<SheetRow<DepartmentRecord>>,
) -> AppResult<ImportCounts> {
    let mut counts = ImportCounts::default();

    for row in rows {
        let line = row.line();
        let DepartmentRecord {
            name,
            department_head_id,
        } = row.record;
        at_line(line, CreateDepartment { name: name.clone() }.validate().map_err(AppError::from))?;

        let existing = match row.id {
            Some(id) => ctx.departments().find_by_id(id, Scope::All).await?,
            None => None,
        };
        let department = match existing {
            Some(dept) => {
                counts.updated += 1;
                let changes = UpdateDepartment {
                    name: Some(name),
                    department_head_id: None,
                };
                ctx.departments().update(dept.id, changes).await?
            }
            None => {
                counts.created += 1;
                ctx.departments().create(CreateDepartment { name }).await?
            }
        };

        match department_head_id {
            Some(head_id) => {
                let member = ctx
                    .faculty()
                    .find_by_id(head_id, Scope::Live)
                    .await?
                    .filter(|f| f.department_id == Some(department.id));
                if member.is_none() {
                    return Err(AppError::validation(format!(
                        "Row {}: faculty {} is not a live member of department {}",
                        line, head_id, department.id
                    )));
                }
                assign_head(ctx, department.id, head_id).await?;
            }
            None => {
                ctx.departments().clear_head(department.id).await?;
                ctx.faculty().demote_heads(department.id).await?;
            }
        }
    }

    Ok(counts)
}

async fn import_courses(
    ctx: &TransactionContext<'_>,
    rows: Vec<SheetRow<CreateCourse>>,
) -> AppResult<ImportCounts> {
    let mut counts = ImportCounts::default();
    let refs = TxReferences::existing(ctx);

    for row in rows {
        let line = row.line();
        at_line(line, row.record.validate().map_err(AppError::from))?;
        at_line(line, refs.department(row.record.department_id).await)?;

        let existing = match row.id {
            Some(id) => ctx.courses().find_by_id(id, Scope::All).await?,
            None => None,
        };
        match existing {
            Some(course) => {
                ctx.courses().replace(course.id, row.record).await?;
                counts.updated += 1;
            }
            None => {
                ctx.courses().create(row.record).await?;
                counts.created += 1;
            }
        }
    }

    Ok(counts)
}

async fn import_academic_years(
    ctx: &TransactionContext<'_>,
    rows: Vec<SheetRow<CreateAcademicYear>>,
) -> AppResult<ImportCounts> {
    let mut counts = ImportCounts::default();

    for row in rows {
        at_line(row.line(), row.record.validate().map_err(AppError::from))?;

        let existing = match row.id {
            Some(id) => ctx.academic_years().find_by_id(id, Scope::All).await?,
            None => None,
        };
        match existing {
            Some(year) => {
                ctx.academic_years().replace(year.id, row.record).await?;
                counts.updated += 1;
            }
            None => {
                ctx.academic_years().create(row.record).await?;
                counts.created += 1;
            }
        }
    }

    Ok(counts)
}

async fn import_students(
    ctx: &TransactionContext<'_>,
    rows: Vec<SheetRow<CreateStudent>>,
) -> AppResult<ImportCounts> {
    let mut counts = ImportCounts::default();
    let refs = TxReferences::existing(ctx);

    for row in rows {
        let line = row.line();
        let record = &row.record;
        at_line(line, record.validate().map_err(AppError::from))?;
        at_line(line, refs.department(record.department_id).await)?;
        at_line(line, refs.course(record.course_id).await)?;
        at_line(line, refs.academic_year(record.academic_year_id).await)?;

        let existing = match row.id {
            Some(id) => ctx.students().find_by_id(id, Scope::All).await?,
            None => None,
        };
        match existing {
            Some(student) => {
                ctx.students().replace(student.id, row.record).await?;
                counts.updated += 1;
            }
            None => {
                ctx.students().create(row.record).await?;
                counts.created += 1;
            }
        }
    }

    Ok(counts)
}

async fn import_faculty(
    ctx: &TransactionContext<'_>,
    rows: Vec<SheetRow<CreateFaculty>>,
) -> AppResult<ImportCounts> {
    let mut counts = ImportCounts::default();
    let refs = TxReferences::existing(ctx);

    for row in rows {
        let line = row.line();
        at_line(line, row.record.validate().map_err(AppError::from))?;
        at_line(line, refs.department(row.record.department_id).await)?;

        let existing = match row.id {
            Some(id) => ctx.faculty().find_by_id(id, Scope::All).await?,
            None => None,
        };
        let previous_department_id = existing.as_ref().and_then(|f| f.department_id);
        let faculty = match existing {
            Some(current) => {
                counts.updated += 1;
                ctx.faculty().replace(current.id, row.record).await?
            }
            None => {
                counts.created += 1;
                ctx.faculty().create(row.record).await?
            }
        };

        // Archived members hold no head reference
        if faculty.lifecycle.is_active() {
            reassert_head(
                ctx,
                faculty.id,
                faculty.department_id,
                faculty.position,
                previous_department_id,
            )
            .await?;
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockSpreadsheetConnector;
    use crate::services::testing::{self, TestUnitOfWork};

    #[tokio::test]
    async fn export_writes_header_and_every_record() {
        let mut uow = TestUnitOfWork::default();
        uow.academic_years.expect_list_all().returning(|| {
            let mut archived = testing::academic_year(2);
            archived.school_year = "2023-2024".to_string();
            archived.lifecycle = testing::archived();
            Ok(vec![testing::academic_year(1), archived])
        });

        let mut connector = MockSpreadsheetConnector::new();
        connector
            .expect_write_rows()
            .withf(|sheet, header, rows| {
                sheet == "academic_years"
                    && header == &["id", "school_year", "archived_at"]
                    && rows.len() == 2
                    && rows[0][2].is_empty()
                    && !rows[1][2].is_empty()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = SyncManager::new(uow.build(), Arc::new(connector));
        let summary = service.export(SheetEntity::AcademicYears).await.unwrap();

        assert_eq!(summary.rows, 2);
    }

    #[tokio::test]
    async fn malformed_row_fails_before_any_write() {
        // Transactions error in the test unit of work, so reaching one would
        // surface as Internal rather than Validation
        let uow = TestUnitOfWork::default();
        let mut connector = MockSpreadsheetConnector::new();
        connector.expect_read_rows().returning(|_| {
            Ok(vec![
                vec!["".into(), "BSCS".into(), "active".into(), "".into()],
                vec!["".into(), "BSIT".into(), "paused".into(), "".into()],
            ])
        });

        let service = SyncManager::new(uow.build(), Arc::new(connector));
        let err = service.import(SheetEntity::Courses).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref msg) if msg.starts_with("Row 3:")));
    }

    #[tokio::test]
    async fn connector_failure_surfaces_as_external_error() {
        let uow = TestUnitOfWork::default();
        let mut connector = MockSpreadsheetConnector::new();
        connector
            .expect_read_rows()
            .returning(|sheet| Err(AppError::external(format!("Sheet '{}' does not exist", sheet))));

        let service = SyncManager::new(uow.build(), Arc::new(connector));
        let err = service.import(SheetEntity::Faculty).await.unwrap_err();

        assert!(matches!(err, AppError::ExternalService(_)));
    }
}
