//! Faculty profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Select, Set,
};

use super::base::{fetch_page, filter_eq, scope_condition, set_status_where};
use super::entities::faculty_profile::{self, ActiveModel, Entity as FacultyEntity};
use crate::domain::{
    CreateFaculty, FacultyFilter, FacultyPosition, FacultyProfile, RecordStatus, Scope,
    UpdateFaculty,
};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Faculty repository trait for dependency injection.
///
/// Operations that touch the department head reference live on
/// [`FacultyQuery`] and run inside a transaction.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FacultyRepository: Send + Sync {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<FacultyProfile>>;

    async fn list(
        &self,
        filter: FacultyFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<FacultyProfile>, u64)>;

    /// Live faculty matching the filter, ordered by last name ascending
    async fn list_for_report(&self, filter: FacultyFilter) -> AppResult<Vec<FacultyProfile>>;

    async fn list_all(&self) -> AppResult<Vec<FacultyProfile>>;

    async fn create(&self, input: CreateFaculty) -> AppResult<FacultyProfile>;

    async fn update(&self, id: i32, changes: UpdateFaculty) -> AppResult<FacultyProfile>;

    async fn archive(&self, id: i32) -> AppResult<bool>;

    async fn restore(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of FacultyRepository
pub struct FacultyStore {
    db: DatabaseConnection,
}

impl FacultyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FacultyRepository for FacultyStore {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<FacultyProfile>> {
        FacultyQuery::new(&self.db).find_by_id(id, scope).await
    }

    async fn list(
        &self,
        filter: FacultyFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<FacultyProfile>, u64)> {
        FacultyQuery::new(&self.db).list(&filter, &page).await
    }

    async fn list_for_report(&self, filter: FacultyFilter) -> AppResult<Vec<FacultyProfile>> {
        FacultyQuery::new(&self.db).list_for_report(&filter).await
    }

    async fn list_all(&self) -> AppResult<Vec<FacultyProfile>> {
        FacultyQuery::new(&self.db).list_all().await
    }

    async fn create(&self, input: CreateFaculty) -> AppResult<FacultyProfile> {
        FacultyQuery::new(&self.db).create(input).await
    }

    async fn update(&self, id: i32, changes: UpdateFaculty) -> AppResult<FacultyProfile> {
        FacultyQuery::new(&self.db).update(id, changes, Scope::Live).await
    }

    async fn archive(&self, id: i32) -> AppResult<bool> {
        let now = Utc::now();
        let result = FacultyEntity::update_many()
            .col_expr(faculty_profile::Column::ArchivedAt, Expr::value(Some(now)))
            .col_expr(faculty_profile::Column::UpdatedAt, Expr::value(now))
            .filter(faculty_profile::Column::Id.eq(id))
            .filter(faculty_profile::Column::ArchivedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn restore(&self, id: i32) -> AppResult<bool> {
        let result = FacultyEntity::update_many()
            .col_expr(
                faculty_profile::Column::ArchivedAt,
                Expr::value(None::<DateTime<Utc>>),
            )
            .col_expr(faculty_profile::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(faculty_profile::Column::Id.eq(id))
            .filter(faculty_profile::Column::ArchivedAt.is_not_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

/// Faculty queries over any connection, pooled or transactional.
pub struct FacultyQuery<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> FacultyQuery<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<FacultyProfile>> {
        let result = FacultyEntity::find_by_id(id)
            .filter(scope_condition(faculty_profile::Column::ArchivedAt, scope))
            .one(self.conn)
            .await?;

        Ok(result.map(FacultyProfile::from))
    }

    fn filtered(filter: &FacultyFilter, scope: Scope) -> Select<FacultyEntity> {
        let select = FacultyEntity::find()
            .filter(scope_condition(faculty_profile::Column::ArchivedAt, scope));
        let select = filter_eq(
            select,
            faculty_profile::Column::DepartmentId,
            filter.department_id,
        );
        let select = filter_eq(
            select,
            faculty_profile::Column::Position,
            filter.position.map(|p| p.as_str()),
        );
        filter_eq(
            select,
            faculty_profile::Column::Status,
            filter.status.map(|s| s.as_str()),
        )
    }

    pub async fn list(
        &self,
        filter: &FacultyFilter,
        page: &PaginationParams,
    ) -> AppResult<(Vec<FacultyProfile>, u64)> {
        let select = Self::filtered(filter, filter.scope)
            .order_by_asc(faculty_profile::Column::LastName)
            .order_by_asc(faculty_profile::Column::FirstName);

        let (models, total) = fetch_page(select, self.conn, page).await?;
        Ok((models.into_iter().map(FacultyProfile::from).collect(), total))
    }

    pub async fn list_for_report(&self, filter: &FacultyFilter) -> AppResult<Vec<FacultyProfile>> {
        let models = Self::filtered(filter, Scope::Live)
            .order_by_asc(faculty_profile::Column::LastName)
            .all(self.conn)
            .await?;

        Ok(models.into_iter().map(FacultyProfile::from).collect())
    }

    pub async fn list_all(&self) -> AppResult<Vec<FacultyProfile>> {
        let models = FacultyEntity::find()
            .order_by_asc(faculty_profile::Column::Id)
            .all(self.conn)
            .await?;

        Ok(models.into_iter().map(FacultyProfile::from).collect())
    }

    pub async fn create(&self, input: CreateFaculty) -> AppResult<FacultyProfile> {
        let now = Utc::now();
        let active_model = ActiveModel {
            first_name: Set(input.first_name),
            middle_name: Set(input.middle_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            position: Set(input.position.as_str().to_string()),
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
            .map_err(|e| AppError::from(e).unique_violation("Faculty email"))?;
        Ok(FacultyProfile::from(model))
    }

    pub async fn update(
        &self,
        id: i32,
        changes: UpdateFaculty,
        scope: Scope,
    ) -> AppResult<FacultyProfile> {
        let found = FacultyEntity::find_by_id(id)
            .filter(scope_condition(faculty_profile::Column::ArchivedAt, scope))
            .one(self.conn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = found.into();
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(middle_name) = changes.middle_name {
            active.middle_name = Set(Some(middle_name).filter(|m| !m.is_empty()));
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(position) = changes.position {
            active.position = Set(position.as_str().to_string());
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
            .map_err(|e| AppError::from(e).unique_violation("Faculty email"))?;
        Ok(FacultyProfile::from(model))
    }

    pub async fn set_position(&self, id: i32, position: FacultyPosition) -> AppResult<u64> {
        let result = FacultyEntity::update_many()
            .col_expr(faculty_profile::Column::Position, Expr::value(position.as_str()))
            .col_expr(faculty_profile::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(faculty_profile::Column::Id.eq(id))
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Demote every head of the department to Instructor
    pub async fn demote_heads(&self, department_id: i32) -> AppResult<u64> {
        self.demote_heads_except(department_id, None).await
    }

    /// Demote every other head of the department to Instructor
    pub async fn demote_other_heads(&self, department_id: i32, keep_id: i32) -> AppResult<u64> {
        self.demote_heads_except(department_id, Some(keep_id)).await
    }

    async fn demote_heads_except(
        &self,
        department_id: i32,
        keep_id: Option<i32>,
    ) -> AppResult<u64> {
        let mut update = FacultyEntity::update_many()
            .col_expr(
                faculty_profile::Column::Position,
                Expr::value(FacultyPosition::Instructor.as_str()),
            )
            .col_expr(faculty_profile::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(faculty_profile::Column::DepartmentId.eq(department_id))
            .filter(faculty_profile::Column::Position.eq(FacultyPosition::DepartmentHead.as_str()));
        if let Some(keep) = keep_id {
            update = update.filter(faculty_profile::Column::Id.ne(keep));
        }

        let result = update.exec(self.conn).await?;
        Ok(result.rows_affected)
    }

    /// Set `status` on every live faculty member of a department
    pub async fn set_status_by_department(
        &self,
        department_id: i32,
        status: RecordStatus,
    ) -> AppResult<u64> {
        set_status_where::<C, FacultyEntity>(
            self.conn,
            faculty_profile::Column::Status,
            faculty_profile::Column::UpdatedAt,
            faculty_profile::Column::ArchivedAt,
            status.as_str(),
            faculty_profile::Column::DepartmentId.eq(department_id),
        )
        .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = FacultyEntity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_department(&self, department_id: i32) -> AppResult<u64> {
        let result = FacultyEntity::delete_many()
            .filter(faculty_profile::Column::DepartmentId.eq(department_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Overwrite every editable field; archive state is kept.
    pub async fn replace(&self, id: i32, input: CreateFaculty) -> AppResult<FacultyProfile> {
        let found = FacultyEntity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = found.into();
        active.first_name = Set(input.first_name);
        active.middle_name = Set(input.middle_name);
        active.last_name = Set(input.last_name);
        active.email = Set(input.email);
        active.position = Set(input.position.as_str().to_string());
        active.status = Set(input.status.as_str().to_string());
        active.department_id = Set(input.department_id);
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.conn)
            .await
            .map_err(|e| AppError::from(e).unique_violation("Faculty email"))?;
        Ok(FacultyProfile::from(model))
    }
}
