//! Department service - department CRUD and the lifecycle cascades.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use super::cascade::CascadeEngine;
use super::head_reconciler::assign_head;
use crate::domain::{
    CreateDepartment, Department, DepartmentFilter, DestroySummary, LifecycleOutcome, Scope,
    UpdateDepartment,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Department service trait for dependency injection.
#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn create(&self, input: CreateDepartment) -> AppResult<Department>;

    /// Get a department; archived ones only when `include_archived` is set
    async fn get(&self, id: i32, include_archived: bool) -> AppResult<Department>;

    async fn list(
        &self,
        filter: DepartmentFilter,
        page: PaginationParams,
    ) -> AppResult<Paginated<Department>>;

    /// Update a live department. A new head must belong to the department.
    async fn update(&self, id: i32, changes: UpdateDepartment) -> AppResult<Department>;

    /// Archive the department and cascade to its courses, faculty and students
    async fn archive(&self, id: i32) -> AppResult<LifecycleOutcome>;

    /// Restore the department and reverse the archive cascade
    async fn restore(&self, id: i32) -> AppResult<LifecycleOutcome>;

    /// Permanently delete the department and everything under it
    async fn destroy(&self, id: i32) -> AppResult<DestroySummary>;
}

/// Concrete implementation of DepartmentService using Unit of Work.
pub struct DepartmentManager<U: UnitOfWork> {
    uow: Arc<U>,
    cascade: CascadeEngine<U>,
}

impl<U: UnitOfWork> DepartmentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self {
            cascade: CascadeEngine::new(uow.clone()),
            uow,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> DepartmentService for DepartmentManager<U> {
    async fn create(&self, input: CreateDepartment) -> AppResult<Department> {
        input.validate()?;
        let department = self.uow.departments().create(input).await?;
        tracing::info!(department_id = department.id, "Department created");
        Ok(department)
    }

    async fn get(&self, id: i32, include_archived: bool) -> AppResult<Department> {
        self.uow
            .departments()
            .find_by_id(id, Scope::for_lookup(include_archived))
            .await?
            .ok_or_not_found()
    }

    async fn list(
        &self,
        filter: DepartmentFilter,
        page: PaginationParams,
    ) -> AppResult<Paginated<Department>> {
        let (rows, total) = self.uow.departments().list(filter, page).await?;
        Ok(Paginated::new(rows, &page, total))
    }

    async fn update(&self, id: i32, changes: UpdateDepartment) -> AppResult<Department> {
        changes.validate()?;

        crate::with_transaction!(self.uow, |ctx| {
            ctx.departments()
                .find_by_id(id, Scope::Live)
                .await?
                .ok_or(AppError::NotFound)?;

            let head_id = changes.department_head_id;
            if let Some(head_id) = head_id {
                let member = ctx
                    .faculty()
                    .find_by_id(head_id, Scope::Live)
                    .await?
                    .filter(|f| f.department_id == Some(id));
                if member.is_none() {
                    return Err(AppError::validation(format!(
                        "Faculty {} is not a live member of department {}",
                        head_id, id
                    )));
                }
            }

            let mut department = ctx.departments().update(id, changes).await?;
            if let Some(head_id) = head_id {
                assign_head(&ctx, id, head_id).await?;
                department = ctx
                    .departments()
                    .find_by_id(id, Scope::All)
                    .await?
                    .ok_or(AppError::NotFound)?;
            }
            Ok(department)
        })
    }

    async fn archive(&self, id: i32) -> AppResult<LifecycleOutcome> {
        self.cascade.archive(id).await
    }

    async fn restore(&self, id: i32) -> AppResult<LifecycleOutcome> {
        self.cascade.restore(id).await
    }

    async fn destroy(&self, id: i32) -> AppResult<DestroySummary> {
        self.cascade.destroy(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{self, TestUnitOfWork};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn get_hides_archived_unless_requested() {
        let mut uow = TestUnitOfWork::default();
        uow.departments
            .expect_find_by_id()
            .with(eq(4), eq(Scope::Live))
            .returning(|_, _| Ok(None));
        uow.departments
            .expect_find_by_id()
            .with(eq(4), eq(Scope::All))
            .returning(|id, _| {
                let mut dept = testing::department(id);
                dept.lifecycle = testing::archived();
                Ok(Some(dept))
            });

        let service = DepartmentManager::new(uow.build());

        assert!(matches!(service.get(4, false).await, Err(AppError::NotFound)));
        assert!(service.get(4, true).await.unwrap().is_archived());
    }

    #[tokio::test]
    async fn create_rejects_blank_name_before_touching_the_store() {
        let mut uow = TestUnitOfWork::default();
        uow.departments.expect_create().never();

        let service = DepartmentManager::new(uow.build());
        let result = service
            .create(CreateDepartment {
                name: String::new(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn list_wraps_rows_in_page_metadata() {
        let mut uow = TestUnitOfWork::default();
        uow.departments
            .expect_list()
            .returning(|_, _| Ok((vec![testing::department(1), testing::department(2)], 12)));

        let service = DepartmentManager::new(uow.build());
        let page = service
            .list(DepartmentFilter::default(), PaginationParams::new(2, 5))
            .await
            .unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.meta.total, 12);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.meta.page, 2);
    }
}
