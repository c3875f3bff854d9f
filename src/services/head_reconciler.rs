//! Department head reconciliation.
//!
//! Keeps `departments.department_head_id` and the faculty "Department Head"
//! position in agreement: one head per department, and the recorded head
//! always holds the position inside that department.

use async_trait::async_trait;
use std::sync::Arc;

use super::events::EventHandler;
use crate::domain::{DomainEvent, FacultyPosition};
use crate::errors::AppResult;
use crate::infra::{TransactionContext, UnitOfWork};

/// Apply the head rules for one faculty member inside `ctx`.
///
/// Returns the number of rows changed.
pub(crate) async fn reassert_head(
    ctx: &TransactionContext<'_>,
    faculty_id: i32,
    department_id: Option<i32>,
    position: FacultyPosition,
    previous_department_id: Option<i32>,
) -> AppResult<u64> {
    let mut changed = 0;

    // Moved away from a department it was heading
    if let Some(previous) = previous_department_id.filter(|p| Some(*p) != department_id) {
        changed += u64::from(ctx.departments().clear_head_if(previous, faculty_id).await?);
    }

    match department_id {
        Some(dept) if position.is_head() => {
            changed += ctx.departments().set_head(dept, faculty_id).await?;
            changed += ctx.faculty().demote_other_heads(dept, faculty_id).await?;
        }
        Some(dept) => {
            changed += u64::from(ctx.departments().clear_head_if(dept, faculty_id).await?);
        }
        None => {}
    }

    Ok(changed)
}

/// Promote `faculty_id` to head of `department_id`, demoting any other head.
pub(crate) async fn assign_head(
    ctx: &TransactionContext<'_>,
    department_id: i32,
    faculty_id: i32,
) -> AppResult<()> {
    ctx.faculty()
        .set_position(faculty_id, FacultyPosition::DepartmentHead)
        .await?;
    ctx.faculty()
        .demote_other_heads(department_id, faculty_id)
        .await?;
    ctx.departments().set_head(department_id, faculty_id).await?;
    Ok(())
}

/// Event handler maintaining the single-head invariant.
///
/// Every event is reconciled in its own transaction.
pub struct HeadReconciler<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> HeadReconciler<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn reconcile(
        &self,
        faculty_id: i32,
        department_id: Option<i32>,
        position: FacultyPosition,
        previous_department_id: Option<i32>,
    ) -> AppResult<u64> {
        crate::with_transaction!(self.uow, |ctx| {
            reassert_head(
                &ctx,
                faculty_id,
                department_id,
                position,
                previous_department_id,
            )
            .await
        })
    }

    async fn release(&self, faculty_id: i32, department_id: Option<i32>) -> AppResult<u64> {
        let Some(dept) = department_id else {
            return Ok(0);
        };

        crate::with_transaction!(self.uow, |ctx| {
            let cleared = ctx.departments().clear_head_if(dept, faculty_id).await?;
            Ok(u64::from(cleared))
        })
    }
}

#[async_trait]
impl<U: UnitOfWork + 'static> EventHandler for HeadReconciler<U> {
    fn name(&self) -> &'static str {
        "HeadReconciler"
    }

    async fn handle(&self, event: &DomainEvent) -> AppResult<()> {
        let changed = match *event {
            DomainEvent::FacultyPositionChanged {
                faculty_id,
                department_id,
                position,
                previous_department_id,
                ..
            } => {
                self.reconcile(faculty_id, department_id, position, previous_department_id)
                    .await?
            }
            DomainEvent::FacultyViewed {
                faculty_id,
                department_id,
                position,
            } => self.reconcile(faculty_id, department_id, position, None).await?,
            DomainEvent::FacultyArchived {
                faculty_id,
                department_id,
            } => self.release(faculty_id, department_id).await?,
        };

        if changed > 0 {
            tracing::info!(
                event = event.name(),
                faculty_id = event.faculty_id(),
                changed,
                "Department head reconciled"
            );
        }
        Ok(())
    }
}
