//! Academic year service.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use super::lifecycle::{archive_record, restore_record};
use crate::domain::{
    AcademicYear, AcademicYearFilter, CreateAcademicYear, LifecycleOutcome, Scope,
    UpdateAcademicYear,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait AcademicYearService: Send + Sync {
    async fn create(&self, input: CreateAcademicYear) -> AppResult<AcademicYear>;

    async fn get(&self, id: i32, include_archived: bool) -> AppResult<AcademicYear>;

    async fn list(
        &self,
        filter: AcademicYearFilter,
        page: PaginationParams,
    ) -> AppResult<Paginated<AcademicYear>>;

    async fn update(&self, id: i32, changes: UpdateAcademicYear) -> AppResult<AcademicYear>;

    async fn archive(&self, id: i32) -> AppResult<LifecycleOutcome>;

    async fn restore(&self, id: i32) -> AppResult<LifecycleOutcome>;

    /// Hard delete; students keep their record with no academic year
    async fn destroy(&self, id: i32) -> AppResult<()>;
}

pub struct AcademicYearManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AcademicYearManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AcademicYearService for AcademicYearManager<U> {
    async fn create(&self, input: CreateAcademicYear) -> AppResult<AcademicYear> {
        input.validate()?;
        self.uow.academic_years().create(input).await
    }

    async fn get(&self, id: i32, include_archived: bool) -> AppResult<AcademicYear> {
        self.uow
            .academic_years()
            .find_by_id(id, Scope::for_lookup(include_archived))
            .await?
            .ok_or_not_found()
    }

    async fn list(
        &self,
        filter: AcademicYearFilter,
        page: PaginationParams,
    ) -> AppResult<Paginated<AcademicYear>> {
        let (rows, total) = self.uow.academic_years().list(filter, page).await?;
        Ok(Paginated::new(rows, &page, total))
    }

    async fn update(&self, id: i32, changes: UpdateAcademicYear) -> AppResult<AcademicYear> {
        changes.validate()?;
        self.uow.academic_years().update(id, changes).await
    }

    async fn archive(&self, id: i32) -> AppResult<LifecycleOutcome> {
        let repo = self.uow.academic_years();
        let current = repo.find_by_id(id, Scope::All).await?.map(|y| y.lifecycle);
        archive_record(current, || repo.archive(id)).await
    }

    async fn restore(&self, id: i32) -> AppResult<LifecycleOutcome> {
        let repo = self.uow.academic_years();
        let current = repo.find_by_id(id, Scope::All).await?.map(|y| y.lifecycle);
        restore_record(current, || repo.restore(id)).await
    }

    async fn destroy(&self, id: i32) -> AppResult<()> {
        if self.uow.academic_years().delete(id).await? == 0 {
            return Err(AppError::NotFound);
        }
        tracing::info!(academic_year_id = id, "Academic year destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{self, TestUnitOfWork};

    #[tokio::test]
    async fn create_validates_school_year_format() {
        let mut uow = TestUnitOfWork::default();
        uow.academic_years.expect_create().never();

        let service = AcademicYearManager::new(uow.build());
        let result = service
            .create(CreateAcademicYear {
                school_year: "2024-2026".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn restore_of_live_year_is_a_noop() {
        let mut uow = TestUnitOfWork::default();
        uow.academic_years
            .expect_find_by_id()
            .returning(|id, _| Ok(Some(testing::academic_year(id))));
        uow.academic_years.expect_restore().never();

        let service = AcademicYearManager::new(uow.build());

        assert_eq!(service.restore(1).await.unwrap(), LifecycleOutcome::NotArchived);
    }
}
