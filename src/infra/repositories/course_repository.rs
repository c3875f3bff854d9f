//! Course repository with soft archive support.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::base::{fetch_page, filter_eq, scope_condition};
use super::entities::course::{self, ActiveModel, Entity as CourseEntity};
use crate::domain::{Course, CourseFilter, CreateCourse, Scope, UpdateCourse};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Course repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Find course by ID within the given scope
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<Course>>;

    async fn list(
        &self,
        filter: CourseFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Course>, u64)>;

    /// Every course, archived included, ordered by id
    async fn list_all(&self) -> AppResult<Vec<Course>>;

    async fn create(&self, input: CreateCourse) -> AppResult<Course>;

    /// Update a live course
    async fn update(&self, id: i32, changes: UpdateCourse) -> AppResult<Course>;

    /// Soft archive; false when the course was not live
    async fn archive(&self, id: i32) -> AppResult<bool>;

    /// Clear the archive timestamp; false when the course was not archived
    async fn restore(&self, id: i32) -> AppResult<bool>;

    /// Permanently delete; enrolled students keep their row with no course
    async fn delete(&self, id: i32) -> AppResult<u64>;
}

/// Concrete implementation of CourseRepository
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<Course>> {
        CourseQuery::new(&self.db).find_by_id(id, scope).await
    }

    async fn list(
        &self,
        filter: CourseFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Course>, u64)> {
        CourseQuery::new(&self.db).list(&filter, &page).await
    }

    async fn list_all(&self) -> AppResult<Vec<Course>> {
        CourseQuery::new(&self.db).list_all().await
    }

    async fn create(&self, input: CreateCourse) -> AppResult<Course> {
        CourseQuery::new(&self.db).create(input).await
    }

    async fn update(&self, id: i32, changes: UpdateCourse) -> AppResult<Course> {
        CourseQuery::new(&self.db).update(id, changes, Scope::Live).await
    }

    async fn archive(&self, id: i32) -> AppResult<bool> {
        CourseQuery::new(&self.db).archive(id).await
    }

    async fn restore(&self, id: i32) -> AppResult<bool> {
        CourseQuery::new(&self.db).restore(id).await
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        CourseQuery::new(&self.db).delete(id).await
    }
}

/// Course queries over any connection, pooled or transactional.
pub struct CourseQuery<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> CourseQuery<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(id)
            .filter(scope_condition(course::Column::ArchivedAt, scope))
            .one(self.conn)
            .await?;

        Ok(result.map(Course::from))
    }

    pub async fn list(
        &self,
        filter: &CourseFilter,
        page: &PaginationParams,
    ) -> AppResult<(Vec<Course>, u64)> {
        let select = CourseEntity::find()
            .filter(scope_condition(course::Column::ArchivedAt, filter.scope))
            .order_by_asc(course::Column::Name);
        let select = filter_eq(select, course::Column::DepartmentId, filter.department_id);
        let select = filter_eq(
            select,
            course::Column::Status,
            filter.status.map(|s| s.as_str()),
        );

        let (models, total) = fetch_page(select, self.conn, page).await?;
        Ok((models.into_iter().map(Course::from).collect(), total))
    }

    pub async fn list_all(&self) -> AppResult<Vec<Course>> {
        let models = CourseEntity::find()
            .order_by_asc(course::Column::Id)
            .all(self.conn)
            .await?;

        Ok(models.into_iter().map(Course::from).collect())
    }

    pub async fn create(&self, input: CreateCourse) -> AppResult<Course> {
        let now = Utc::now();
        let active_model = ActiveModel {
            name: Set(input.name),
            status: Set(input.status.as_str().to_string()),
            department_id: Set(input.department_id),
            created_at: Set(now),
            updated_at: Set(now),
            archived_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(self.conn)
            .await
            .map_err(|e| AppError::from(e).unique_violation("Course name"))?;
        Ok(Course::from(model))
    }

    /// Update a course within `scope`; archive state is never touched.
    pub async fn update(&self, id: i32, changes: UpdateCourse, scope: Scope) -> AppResult<Course> {
        let found = CourseEntity::find_by_id(id)
            .filter(scope_condition(course::Column::ArchivedAt, scope))
            .one(self.conn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = found.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(department_id) = changes.department_id {
            active.department_id = Set(Some(department_id));
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.conn)
            .await
            .map_err(|e| AppError::from(e).unique_violation("Course name"))?;
        Ok(Course::from(model))
    }

    pub async fn archive(&self, id: i32) -> AppResult<bool> {
        let now = Utc::now();
        let result = CourseEntity::update_many()
            .col_expr(course::Column::ArchivedAt, Expr::value(Some(now)))
            .col_expr(course::Column::UpdatedAt, Expr::value(now))
            .filter(course::Column::Id.eq(id))
            .filter(course::Column::ArchivedAt.is_null())
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn restore(&self, id: i32) -> AppResult<bool> {
        let result = CourseEntity::update_many()
            .col_expr(course::Column::ArchivedAt, Expr::value(None::<DateTime<Utc>>))
            .col_expr(course::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(course::Column::Id.eq(id))
            .filter(course::Column::ArchivedAt.is_not_null())
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Archive every live course of a department
    pub async fn archive_by_department(&self, department_id: i32) -> AppResult<u64> {
        let now = Utc::now();
        let result = CourseEntity::update_many()
            .col_expr(course::Column::ArchivedAt, Expr::value(Some(now)))
            .col_expr(course::Column::UpdatedAt, Expr::value(now))
            .filter(course::Column::DepartmentId.eq(department_id))
            .filter(course::Column::ArchivedAt.is_null())
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Restore every archived course of a department, returning their ids
    pub async fn restore_by_department(&self, department_id: i32) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = CourseEntity::find()
            .select_only()
            .column(course::Column::Id)
            .filter(course::Column::DepartmentId.eq(department_id))
            .filter(course::Column::ArchivedAt.is_not_null())
            .into_tuple()
            .all(self.conn)
            .await?;

        if ids.is_empty() {
            return Ok(ids);
        }

        CourseEntity::update_many()
            .col_expr(course::Column::ArchivedAt, Expr::value(None::<DateTime<Utc>>))
            .col_expr(course::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(course::Column::Id.is_in(ids.clone()))
            .exec(self.conn)
            .await?;

        Ok(ids)
    }

    /// Ids of every course of a department, archived included
    pub async fn ids_by_department(&self, department_id: i32) -> AppResult<Vec<i32>> {
        let ids = CourseEntity::find()
            .select_only()
            .column(course::Column::Id)
            .filter(course::Column::DepartmentId.eq(department_id))
            .order_by_asc(course::Column::Id)
            .into_tuple()
            .all(self.conn)
            .await?;

        Ok(ids)
    }

    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = CourseEntity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected)
    }

    /// Overwrite every editable field; archive state is kept.
    pub async fn replace(&self, id: i32, input: CreateCourse) -> AppResult<Course> {
        let found = CourseEntity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = found.into();
        active.name = Set(input.name);
        active.status = Set(input.status.as_str().to_string());
        active.department_id = Set(input.department_id);
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.conn)
            .await
            .map_err(|e| AppError::from(e).unique_violation("Course name"))?;
        Ok(Course::from(model))
    }
}
