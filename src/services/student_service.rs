//! Student service - student profile CRUD.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use super::lifecycle::{archive_record, restore_record};
use super::references::{require_academic_year, require_course, require_department};
use crate::domain::{
    CreateStudent, LifecycleOutcome, Scope, StudentFilter, StudentProfile, UpdateStudent,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait StudentService: Send + Sync {
    async fn create(&self, input: CreateStudent) -> AppResult<StudentProfile>;

    async fn get(&self, id: i32, include_archived: bool) -> AppResult<StudentProfile>;

    /// List students matching every present filter
    async fn list(
        &self,
        filter: StudentFilter,
        page: PaginationParams,
    ) -> AppResult<Paginated<StudentProfile>>;

    async fn update(&self, id: i32, changes: UpdateStudent) -> AppResult<StudentProfile>;

    async fn archive(&self, id: i32) -> AppResult<LifecycleOutcome>;

    async fn restore(&self, id: i32) -> AppResult<LifecycleOutcome>;

    async fn destroy(&self, id: i32) -> AppResult<()>;
}

pub struct StudentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StudentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn check_references(
        &self,
        department_id: Option<i32>,
        course_id: Option<i32>,
        academic_year_id: Option<i32>,
    ) -> AppResult<()> {
        require_department(&*self.uow, department_id).await?;
        require_course(&*self.uow, course_id).await?;
        require_academic_year(&*self.uow, academic_year_id).await
    }
}

#[async_trait]
impl<U: UnitOfWork> StudentService for StudentManager<U> {
    async fn create(&self, input: CreateStudent) -> AppResult<StudentProfile> {
        input.validate()?;
        self.check_references(input.department_id, input.course_id, input.academic_year_id)
            .await?;

        let student = self.uow.students().create(input).await?;
        tracing::debug!(student_id = student.id, "Student created");
        Ok(student)
    }

    async fn get(&self, id: i32, include_archived: bool) -> AppResult<StudentProfile> {
        self.uow
            .students()
            .find_by_id(id, Scope::for_lookup(include_archived))
            .await?
            .ok_or_not_found()
    }

    async fn list(
        &self,
        filter: StudentFilter,
        page: PaginationParams,
    ) -> AppResult<Paginated<StudentProfile>> {
        let (rows, total) = self.uow.students().list(filter, page).await?;
        Ok(Paginated::new(rows, &page, total))
    }

    async fn update(&self, id: i32, changes: UpdateStudent) -> AppResult<StudentProfile> {
        changes.validate()?;
        self.check_references(
            changes.department_id,
            changes.course_id,
            changes.academic_year_id,
        )
        .await?;

        self.uow.students().update(id, changes).await
    }

    async fn archive(&self, id: i32) -> AppResult<LifecycleOutcome> {
        let repo = self.uow.students();
        let current = repo.find_by_id(id, Scope::All).await?.map(|s| s.lifecycle);
        archive_record(current, || repo.archive(id)).await
    }

    async fn restore(&self, id: i32) -> AppResult<LifecycleOutcome> {
        let repo = self.uow.students();
        let current = repo.find_by_id(id, Scope::All).await?.map(|s| s.lifecycle);
        restore_record(current, || repo.restore(id)).await
    }

    async fn destroy(&self, id: i32) -> AppResult<()> {
        match self.uow.students().delete(id).await? {
            0 => Err(AppError::NotFound),
            _ => Ok(()),
        }
    }
}
