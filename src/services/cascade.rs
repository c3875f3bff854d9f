//! Department archive, restore and destroy cascades.
//!
//! Each cascade runs in a single transaction. Store failures inside it
//! surface as [`AppError::Cascade`] after the rollback.

use std::sync::Arc;

use crate::domain::{DestroySummary, LifecycleOutcome, RecordStatus, Scope, StudentStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Rows touched by an archive or restore cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeCounts {
    pub courses: u64,
    pub faculty: u64,
    pub students: u64,
}

fn concurrent_change() -> AppError {
    AppError::conflict("Department was modified concurrently, retry the request")
}

/// Propagates department lifecycle changes to courses, faculty and students.
pub struct CascadeEngine<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CascadeEngine<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Archive a department and its live courses, deactivating its people.
    ///
    /// Faculty and students keep their archive state; only their status
    /// changes. Students of other departments enrolled in these courses are
    /// left alone.
    pub async fn archive(&self, department_id: i32) -> AppResult<LifecycleOutcome> {
        let (outcome, counts) = crate::with_transaction!(self.uow, |ctx| {
            let dept = ctx
                .departments()
                .find_by_id(department_id, Scope::All)
                .await?
                .ok_or(AppError::NotFound)?;
            if dept.is_archived() {
                return Ok((LifecycleOutcome::AlreadyArchived, CascadeCounts::default()));
            }

            let counts = CascadeCounts {
                faculty: ctx
                    .faculty()
                    .set_status_by_department(department_id, RecordStatus::Inactive)
                    .await?,
                students: ctx
                    .students()
                    .set_status_by_department(department_id, StudentStatus::Inactive)
                    .await?,
                courses: ctx.courses().archive_by_department(department_id).await?,
            };

            if !ctx
                .departments()
                .archive_versioned(department_id, dept.lock_version)
                .await?
            {
                return Err(concurrent_change());
            }

            Ok((LifecycleOutcome::Archived, counts))
        })
        .map_err(|e| e.into_cascade("archive department"))?;

        match outcome {
            LifecycleOutcome::Archived => tracing::info!(
                department_id,
                courses = counts.courses,
                faculty = counts.faculty,
                students = counts.students,
                "Department archived"
            ),
            _ => tracing::debug!(department_id, "Department already archived"),
        }
        Ok(outcome)
    }

    /// Restore a department and its archived courses, reactivating people.
    ///
    /// Students enrolled in a restored course are reactivated even when they
    /// belong to another department.
    pub async fn restore(&self, department_id: i32) -> AppResult<LifecycleOutcome> {
        let (outcome, counts) = crate::with_transaction!(self.uow, |ctx| {
            let dept = ctx
                .departments()
                .find_by_id(department_id, Scope::All)
                .await?
                .ok_or(AppError::NotFound)?;
            if !dept.is_archived() {
                return Ok((LifecycleOutcome::NotArchived, CascadeCounts::default()));
            }

            let restored_courses = ctx.courses().restore_by_department(department_id).await?;
            let faculty = ctx
                .faculty()
                .set_status_by_department(department_id, RecordStatus::Active)
                .await?;
            let mut students = ctx
                .students()
                .set_status_by_department(department_id, StudentStatus::Active)
                .await?;
            students += ctx
                .students()
                .set_status_by_courses(&restored_courses, StudentStatus::Active)
                .await?;

            if !ctx
                .departments()
                .restore_versioned(department_id, dept.lock_version)
                .await?
            {
                return Err(concurrent_change());
            }

            let counts = CascadeCounts {
                courses: restored_courses.len() as u64,
                faculty,
                students,
            };
            Ok((LifecycleOutcome::Restored, counts))
        })
        .map_err(|e| e.into_cascade("restore department"))?;

        match outcome {
            LifecycleOutcome::Restored => tracing::info!(
                department_id,
                courses = counts.courses,
                faculty = counts.faculty,
                students = counts.students,
                "Department restored"
            ),
            _ => tracing::debug!(department_id, "Department was not archived"),
        }
        Ok(outcome)
    }

    /// Permanently delete a department with its courses, students and faculty.
    pub async fn destroy(&self, department_id: i32) -> AppResult<DestroySummary> {
        let summary = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    ctx.departments()
                        .find_by_id(department_id, Scope::All)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    let mut summary = DestroySummary::default();
                    for course_id in ctx.courses().ids_by_department(department_id).await? {
                        summary.students += ctx.students().delete_by_course(course_id).await?;
                        summary.courses += ctx.courses().delete(course_id).await?;
                    }
                    summary.students += ctx.students().delete_by_department(department_id).await?;
                    summary.faculty = ctx.faculty().delete_by_department(department_id).await?;
                    ctx.departments().delete(department_id).await?;

                    Ok(summary)
                })
            })
            .await
            .map_err(|e| e.into_cascade("destroy department"))?;

        tracing::info!(
            department_id,
            courses = summary.courses,
            students = summary.students,
            faculty = summary.faculty,
            "Department destroyed"
        );
        Ok(summary)
    }
}
