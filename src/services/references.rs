//! Checks that referenced departments, courses and academic years are live.

use crate::domain::Scope;
use crate::errors::{AppError, AppResult};
use crate::infra::{TransactionContext, UnitOfWork};

fn check(kind: &str, id: i32, found: bool) -> AppResult<()> {
    if found {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "{} {} does not exist or is archived",
            kind, id
        )))
    }
}

pub(crate) async fn require_department<U: UnitOfWork>(uow: &U, id: Option<i32>) -> AppResult<()> {
    let Some(id) = id else { return Ok(()) };
    let found = uow.departments().find_by_id(id, Scope::Live).await?;
    check("Department", id, found.is_some())
}

pub(crate) async fn require_course<U: UnitOfWork>(uow: &U, id: Option<i32>) -> AppResult<()> {
    let Some(id) = id else { return Ok(()) };
    let found = uow.courses().find_by_id(id, Scope::Live).await?;
    check("Course", id, found.is_some())
}

pub(crate) async fn require_academic_year<U: UnitOfWork>(
    uow: &U,
    id: Option<i32>,
) -> AppResult<()> {
    let Some(id) = id else { return Ok(()) };
    let found = uow.academic_years().find_by_id(id, Scope::Live).await?;
    check("Academic year", id, found.is_some())
}

/// Existence checks against an open transaction.
///
/// Archived rows are accepted so that exported sheets re-import cleanly.
pub(crate) struct TxReferences<'t, 'a> {
    ctx: &'t TransactionContext<'a>,
    scope: Scope,
}

impl<'t, 'a> TxReferences<'t, 'a> {
    pub(crate) fn existing(ctx: &'t TransactionContext<'a>) -> Self {
        Self {
            ctx,
            scope: Scope::All,
        }
    }

    pub(crate) async fn department(&self, id: Option<i32>) -> AppResult<()> {
        let Some(id) = id else { return Ok(()) };
        let found = self.ctx.departments().find_by_id(id, self.scope).await?;
        check("Department", id, found.is_some())
    }

    pub(crate) async fn course(&self, id: Option<i32>) -> AppResult<()> {
        let Some(id) = id else { return Ok(()) };
        let found = self.ctx.courses().find_by_id(id, self.scope).await?;
        check("Course", id, found.is_some())
    }

    pub(crate) async fn academic_year(&self, id: Option<i32>) -> AppResult<()> {
        let Some(id) = id else { return Ok(()) };
        let found = self.ctx.academic_years().find_by_id(id, self.scope).await?;
        check("Academic year", id, found.is_some())
    }
}
