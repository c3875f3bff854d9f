//! Course service - course CRUD with single-row archive.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use super::lifecycle::{archive_record, restore_record};
use super::references::require_department;
use crate::domain::{Course, CourseFilter, CreateCourse, LifecycleOutcome, Scope, UpdateCourse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Course service trait for dependency injection.
#[async_trait]
pub trait CourseService: Send + Sync {
    async fn create(&self, input: CreateCourse) -> AppResult<Course>;

    async fn get(&self, id: i32, include_archived: bool) -> AppResult<Course>;

    async fn list(&self, filter: CourseFilter, page: PaginationParams)
        -> AppResult<Paginated<Course>>;

    async fn update(&self, id: i32, changes: UpdateCourse) -> AppResult<Course>;

    async fn archive(&self, id: i32) -> AppResult<LifecycleOutcome>;

    async fn restore(&self, id: i32) -> AppResult<LifecycleOutcome>;

    /// Hard delete; enrolled students keep their record with no course
    async fn destroy(&self, id: i32) -> AppResult<()>;
}

pub struct CourseManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CourseManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CourseService for CourseManager<U> {
    async fn create(&self, input: CreateCourse) -> AppResult<Course> {
        input.validate()?;
        require_department(&*self.uow, input.department_id).await?;
        self.uow.courses().create(input).await
    }

    async fn get(&self, id: i32, include_archived: bool) -> AppResult<Course> {
        self.uow
            .courses()
            .find_by_id(id, Scope::for_lookup(include_archived))
            .await?
            .ok_or_not_found()
    }

    async fn list(
        &self,
        filter: CourseFilter,
        page: PaginationParams,
    ) -> AppResult<Paginated<Course>> {
        let (rows, total) = self.uow.courses().list(filter, page).await?;
        Ok(Paginated::new(rows, &page, total))
    }

    async fn update(&self, id: i32, changes: UpdateCourse) -> AppResult<Course> {
        changes.validate()?;
        require_department(&*self.uow, changes.department_id).await?;
        self.uow.courses().update(id, changes).await
    }

    async fn archive(&self, id: i32) -> AppResult<LifecycleOutcome> {
        let repo = self.uow.courses();
        let current = repo.find_by_id(id, Scope::All).await?.map(|c| c.lifecycle);
        let outcome = archive_record(current, || repo.archive(id)).await?;
        tracing::debug!(course_id = id, ?outcome, "Course archive requested");
        Ok(outcome)
    }

    async fn restore(&self, id: i32) -> AppResult<LifecycleOutcome> {
        let repo = self.uow.courses();
        let current = repo.find_by_id(id, Scope::All).await?.map(|c| c.lifecycle);
        restore_record(current, || repo.restore(id)).await
    }

    async fn destroy(&self, id: i32) -> AppResult<()> {
        match self.uow.courses().delete(id).await? {
            0 => Err(AppError::NotFound),
            _ => {
                tracing::info!(course_id = id, "Course destroyed");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{self, TestUnitOfWork};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn create_rejects_archived_department() {
        let mut uow = TestUnitOfWork::default();
        uow.departments
            .expect_find_by_id()
            .with(eq(3), eq(Scope::Live))
            .returning(|_, _| Ok(None));
        uow.courses.expect_create().never();

        let service = CourseManager::new(uow.build());
        let err = service
            .create(CreateCourse {
                name: "BSCS".to_string(),
                status: Default::default(),
                department_id: Some(3),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("Department 3")));
    }

    #[tokio::test]
    async fn archive_of_archived_course_is_a_noop() {
        let mut uow = TestUnitOfWork::default();
        uow.courses.expect_find_by_id().returning(|id, _| {
            let mut course = testing::course(id, None);
            course.lifecycle = testing::archived();
            Ok(Some(course))
        });
        uow.courses.expect_archive().never();

        let service = CourseManager::new(uow.build());
        let outcome = service.archive(9).await.unwrap();

        assert_eq!(outcome, LifecycleOutcome::AlreadyArchived);
    }

    #[tokio::test]
    async fn restore_writes_when_archived() {
        let mut uow = TestUnitOfWork::default();
        uow.courses.expect_find_by_id().returning(|id, _| {
            let mut course = testing::course(id, Some(1));
            course.lifecycle = testing::archived();
            Ok(Some(course))
        });
        uow.courses
            .expect_restore()
            .with(eq(9))
            .times(1)
            .returning(|_| Ok(true));

        let service = CourseManager::new(uow.build());

        assert_eq!(service.restore(9).await.unwrap(), LifecycleOutcome::Restored);
    }

    #[tokio::test]
    async fn destroy_missing_course_is_not_found() {
        let mut uow = TestUnitOfWork::default();
        uow.courses.expect_delete().returning(|_| Ok(0));

        let service = CourseManager::new(uow.build());

        assert!(matches!(service.destroy(42).await, Err(AppError::NotFound)));
    }
}
