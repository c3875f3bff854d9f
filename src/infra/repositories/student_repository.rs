//! Student profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Select, Set,
};

use super::base::{fetch_page, filter_eq, scope_condition, set_status_where};
use super::entities::student_profile::{self, ActiveModel, Entity as StudentEntity};
use crate::domain::{
    CreateStudent, Scope, StudentFilter, StudentProfile, StudentStatus, UpdateStudent,
};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Student repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<StudentProfile>>;

    /// List one page ordered by last name, then first name
    async fn list(
        &self,
        filter: StudentFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<StudentProfile>, u64)>;

    /// Live students matching the filter, ordered by last name ascending
    async fn list_for_report(&self, filter: StudentFilter) -> AppResult<Vec<StudentProfile>>;

    async fn list_all(&self) -> AppResult<Vec<StudentProfile>>;

    async fn create(&self, input: CreateStudent) -> AppResult<StudentProfile>;

    async fn update(&self, id: i32, changes: UpdateStudent) -> AppResult<StudentProfile>;

    async fn archive(&self, id: i32) -> AppResult<bool>;

    async fn restore(&self, id: i32) -> AppResult<bool>;

    async fn delete(&self, id: i32) -> AppResult<u64>;
}

/// Concrete implementation of StudentRepository
pub struct StudentStore {
    db: DatabaseConnection,
}

impl StudentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for StudentStore {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<StudentProfile>> {
        StudentQuery::new(&self.db).find_by_id(id, scope).await
    }

    async fn list(
        &self,
        filter: StudentFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<StudentProfile>, u64)> {
        StudentQuery::new(&self.db).list(&filter, &page).await
    }

    async fn list_for_report(&self, filter: StudentFilter) -> AppResult<Vec<StudentProfile>> {
        StudentQuery::new(&self.db).list_for_report(&filter).await
    }

    async fn list_all(&self) -> AppResult<Vec<StudentProfile>> {
        StudentQuery::new(&self.db).list_all().await
    }

    async fn create(&self, input: CreateStudent) -> AppResult<StudentProfile> {
        StudentQuery::new(&self.db).create(input).await
    }

    async fn update(&self, id: i32, changes: UpdateStudent) -> AppResult<StudentProfile> {
        StudentQuery::new(&self.db).update(id, changes, Scope::Live).await
    }

    async fn archive(&self, id: i32) -> AppResult<bool> {
        let now = Utc::now();
        let result = StudentEntity::update_many()
            .col_expr(student_profile::Column::ArchivedAt, Expr::value(Some(now)))
            .col_expr(student_profile::Column::UpdatedAt, Expr::value(now))
            .filter(student_profile::Column::Id.eq(id))
            .filter(student_profile::Column::ArchivedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn restore(&self, id: i32) -> AppResult<bool> {
        let result = StudentEntity::update_many()
            .col_expr(
                student_profile::Column::ArchivedAt,
                Expr::value(None::<DateTime<Utc>>),
            )
            .col_expr(student_profile::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(student_profile::Column::Id.eq(id))
            .filter(student_profile::Column::ArchivedAt.is_not_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = StudentEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

/// Student queries over any connection, pooled or transactional.
pub struct StudentQuery<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> StudentQuery<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<StudentProfile>> {
        let result = StudentEntity::find_by_id(id)
            .filter(scope_condition(student_profile::Column::ArchivedAt, scope))
            .one(self.conn)
            .await?;

        Ok(result.map(StudentProfile::from))
    }

    fn filtered(filter: &StudentFilter, scope: Scope) -> Select<StudentEntity> {
        let select = StudentEntity::find()
            .filter(scope_condition(student_profile::Column::ArchivedAt, scope));
        let select = filter_eq(select, student_profile::Column::CourseId, filter.course_id);
        let select = filter_eq(
            select,
            student_profile::Column::DepartmentId,
            filter.department_id,
        );
        let select = filter_eq(
            select,
            student_profile::Column::AcademicYearId,
            filter.academic_year_id,
        );
        let select = filter_eq(
            select,
            student_profile::Column::Status,
            filter.status.map(|s| s.as_str()),
        );
        filter_eq(select, student_profile::Column::YearLevel, filter.year_level)
    }

    pub async fn list(
        &self,
        filter: &StudentFilter,
        page: &PaginationParams,
    ) -> AppResult<(Vec<StudentProfile>, u64)> {
        let select = Self::filtered(filter, filter.scope)
            .order_by_asc(student_profile::Column::LastName)
            .order_by_asc(student_profile::Column::FirstName);

        let (models, total) = fetch_page(select, self.conn, page).await?;
        Ok((models.into_iter().map(StudentProfile::from).collect(), total))
    }

    pub async fn list_for_report(&self, filter: &StudentFilter) -> AppResult<Vec<StudentProfile>> {
        let models = Self::filtered(filter, Scope::Live)
            .order_by_asc(student_profile::Column::LastName)
            .all(self.conn)
            .await?;

        Ok(models.into_iter().map(StudentProfile::from).collect())
    }

    pub async fn list_all(&self) -> AppResult<Vec<StudentProfile>> {
        let models = StudentEntity::find()
            .order_by_asc(student_profile::Column::Id)
            .all(self.conn)
            .await?;

        Ok(models.into_iter().map(StudentProfile::from).collect())
    }

    pub async fn create(&self, input: CreateStudent) -> AppResult<StudentProfile> {
        let now = Utc::now();
        let active_model = ActiveModel {
            student_number: Set(input.student_number),
            first_name: Set(input.first_name),
            middle_name: Set(input.middle_name),
            last_name: Set(input.last_name),
            status: Set(input.status.as_str().to_string()),
            department_id: Set(input.department_id),
            course_id: Set(input.course_id),
            academic_year_id: Set(input.academic_year_id),
            year_level: Set(input.year_level),
            created_at: Set(now),
            updated_at: Set(now),
            archived_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(self.conn)
            .await
            .map_err(|e| AppError::from(e).unique_violation("Student number"))?;
        Ok(StudentProfile::from(model))
    }

    pub async fn update(
        &self,
        id: i32,
        changes: UpdateStudent,
        scope: Scope,
    ) -> AppResult<StudentProfile> {
        let found = StudentEntity::find_by_id(id)
            .filter(scope_condition(student_profile::Column::ArchivedAt, scope))
            .one(self.conn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = found.into();
        if let Some(student_number) = changes.student_number {
            active.student_number = Set(student_number);
        }
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(middle_name) = changes.middle_name {
            active.middle_name = Set(Some(middle_name).filter(|m| !m.is_empty()));
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(department_id) = changes.department_id {
            active.department_id = Set(Some(department_id));
        }
        if let Some(course_id) = changes.course_id {
            active.course_id = Set(Some(course_id));
        }
        if let Some(academic_year_id) = changes.academic_year_id {
            active.academic_year_id = Set(Some(academic_year_id));
        }
        if let Some(year_level) = changes.year_level {
            active.year_level = Set(year_level);
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.conn)
            .await
            .map_err(|e| AppError::from(e).unique_violation("Student number"))?;
        Ok(StudentProfile::from(model))
    }

    /// Set `status` on every live student of a department
    pub async fn set_status_by_department(
        &self,
        department_id: i32,
        status: StudentStatus,
    ) -> AppResult<u64> {
        set_status_where::<C, StudentEntity>(
            self.conn,
            student_profile::Column::Status,
            student_profile::Column::UpdatedAt,
            student_profile::Column::ArchivedAt,
            status.as_str(),
            student_profile::Column::DepartmentId.eq(department_id),
        )
        .await
    }

    /// Set `status` on every live student enrolled in one of `course_ids`
    pub async fn set_status_by_courses(
        &self,
        course_ids: &[i32],
        status: StudentStatus,
    ) -> AppResult<u64> {
        if course_ids.is_empty() {
            return Ok(0);
        }

        set_status_where::<C, StudentEntity>(
            self.conn,
            student_profile::Column::Status,
            student_profile::Column::UpdatedAt,
            student_profile::Column::ArchivedAt,
            status.as_str(),
            student_profile::Column::CourseId.is_in(course_ids.iter().copied()),
        )
        .await
    }

    pub async fn delete_by_course(&self, course_id: i32) -> AppResult<u64> {
        let result = StudentEntity::delete_many()
            .filter(student_profile::Column::CourseId.eq(course_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_department(&self, department_id: i32) -> AppResult<u64> {
        let result = StudentEntity::delete_many()
            .filter(student_profile::Column::DepartmentId.eq(department_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Overwrite every editable field; archive state is kept.
    pub async fn replace(&self, id: i32, input: CreateStudent) -> AppResult<StudentProfile> {
        let found = StudentEntity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = found.into();
        active.student_number = Set(input.student_number);
        active.first_name = Set(input.first_name);
        active.middle_name = Set(input.middle_name);
        active.last_name = Set(input.last_name);
        active.status = Set(input.status.as_str().to_string());
        active.department_id = Set(input.department_id);
        active.course_id = Set(input.course_id);
        active.academic_year_id = Set(input.academic_year_id);
        active.year_level = Set(input.year_level);
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.conn)
            .await
            .map_err(|e| AppError::from(e).unique_violation("Student number"))?;
        Ok(StudentProfile::from(model))
    }
}
