//! Department repository.
//!
//! Reads and creates go through the pooled [`DepartmentStore`]; every write
//! that must be versioned or cascaded runs on a [`DepartmentQuery`] bound to
//! the open transaction.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::base::{fetch_page, scope_condition};
use super::entities::department::{self, ActiveModel, Entity as DepartmentEntity};
use crate::domain::{CreateDepartment, Department, DepartmentFilter, Scope, UpdateDepartment};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Department repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Find department by ID within the given scope
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<Department>>;

    /// List one page of departments matching the filter, ordered by name
    async fn list(
        &self,
        filter: DepartmentFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Department>, u64)>;

    /// Every department, archived included, ordered by id
    async fn list_all(&self) -> AppResult<Vec<Department>>;

    async fn create(&self, input: CreateDepartment) -> AppResult<Department>;
}

/// Concrete implementation of DepartmentRepository
pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DepartmentRepository for DepartmentStore {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<Department>> {
        DepartmentQuery::new(&self.db).find_by_id(id, scope).await
    }

    async fn list(
        &self,
        filter: DepartmentFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Department>, u64)> {
        DepartmentQuery::new(&self.db).list(&filter, &page).await
    }

    async fn list_all(&self) -> AppResult<Vec<Department>> {
        DepartmentQuery::new(&self.db).list_all().await
    }

    async fn create(&self, input: CreateDepartment) -> AppResult<Department> {
        DepartmentQuery::new(&self.db).create(input).await
    }
}

/// Department queries over any connection, pooled or transactional.
pub struct DepartmentQuery<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> DepartmentQuery<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<Department>> {
        let result = DepartmentEntity::find_by_id(id)
            .filter(scope_condition(department::Column::ArchivedAt, scope))
            .one(self.conn)
            .await?;

        Ok(result.map(Department::from))
    }

    pub async fn list(
        &self,
        filter: &DepartmentFilter,
        page: &PaginationParams,
    ) -> AppResult<(Vec<Department>, u64)> {
        let mut select = DepartmentEntity::find()
            .filter(scope_condition(department::Column::ArchivedAt, filter.scope))
            .order_by_asc(department::Column::Name);
        if let Some(name) = filter.name.as_deref().filter(|n| !n.is_empty()) {
            select = select.filter(department::Column::Name.contains(name));
        }

        let (models, total) = fetch_page(select, self.conn, page).await?;
        Ok((models.into_iter().map(Department::from).collect(), total))
    }

    pub async fn list_all(&self) -> AppResult<Vec<Department>> {
        let models = DepartmentEntity::find()
            .order_by_asc(department::Column::Id)
            .all(self.conn)
            .await?;

        Ok(models.into_iter().map(Department::from).collect())
    }

    pub async fn create(&self, input: CreateDepartment) -> AppResult<Department> {
        let now = Utc::now();
        let active_model = ActiveModel {
            name: Set(input.name),
            department_head_id: Set(None),
            lock_version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            archived_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(self.conn)
            .await
            .map_err(|e| AppError::from(e).unique_violation("Department name"))?;
        Ok(Department::from(model))
    }

    /// Apply field changes to a department of any state, bumping its version.
    ///
    /// `department_head_id` is written as given; callers validate it first.
    pub async fn update(&self, id: i32, changes: UpdateDepartment) -> AppResult<Department> {
        let dept = DepartmentEntity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or(AppError::NotFound)?;

        let version = dept.lock_version;
        let mut active: ActiveModel = dept.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(head_id) = changes.department_head_id {
            active.department_head_id = Set(Some(head_id));
        }
        active.lock_version = Set(version + 1);
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.conn)
            .await
            .map_err(|e| AppError::from(e).unique_violation("Department name"))?;
        Ok(Department::from(model))
    }

    /// Point the department at `head_id`, bumping its version.
    ///
    /// Rows already pointing at `head_id` are left untouched.
    pub async fn set_head(&self, id: i32, head_id: i32) -> AppResult<u64> {
        let result = DepartmentEntity::update_many()
            .col_expr(department::Column::DepartmentHeadId, Expr::value(head_id))
            .col_expr(
                department::Column::LockVersion,
                Expr::col(department::Column::LockVersion).add(1),
            )
            .col_expr(department::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(department::Column::Id.eq(id))
            .filter(
                Condition::any()
                    .add(department::Column::DepartmentHeadId.is_null())
                    .add(department::Column::DepartmentHeadId.ne(head_id)),
            )
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Clear the head reference only if it still points at `faculty_id`.
    pub async fn clear_head_if(&self, id: i32, faculty_id: i32) -> AppResult<bool> {
        let cleared = self
            .clear_head_where(
                department::Column::Id
                    .eq(id)
                    .and(department::Column::DepartmentHeadId.eq(faculty_id)),
            )
            .await?;
        Ok(cleared > 0)
    }

    /// Clear every head reference to `faculty_id`, whatever the department.
    pub async fn clear_head_references(&self, faculty_id: i32) -> AppResult<u64> {
        self.clear_head_where(department::Column::DepartmentHeadId.eq(faculty_id))
            .await
    }

    async fn clear_head_where(&self, condition: sea_orm::sea_query::SimpleExpr) -> AppResult<u64> {
        let result = DepartmentEntity::update_many()
            .col_expr(
                department::Column::DepartmentHeadId,
                Expr::value(Option::<i32>::None),
            )
            .col_expr(
                department::Column::LockVersion,
                Expr::col(department::Column::LockVersion).add(1),
            )
            .col_expr(department::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(condition)
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Archive if the row is still live at `expected_version`.
    ///
    /// Returns false when another writer changed the row first.
    pub async fn archive_versioned(&self, id: i32, expected_version: i32) -> AppResult<bool> {
        let now = Utc::now();
        let result = DepartmentEntity::update_many()
            .col_expr(department::Column::ArchivedAt, Expr::value(Some(now)))
            .col_expr(department::Column::LockVersion, Expr::value(expected_version + 1))
            .col_expr(department::Column::UpdatedAt, Expr::value(now))
            .filter(department::Column::Id.eq(id))
            .filter(department::Column::LockVersion.eq(expected_version))
            .filter(department::Column::ArchivedAt.is_null())
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Restore if the row is still archived at `expected_version`.
    pub async fn restore_versioned(&self, id: i32, expected_version: i32) -> AppResult<bool> {
        let result = DepartmentEntity::update_many()
            .col_expr(
                department::Column::ArchivedAt,
                Expr::value(Option::<chrono::DateTime<Utc>>::None),
            )
            .col_expr(department::Column::LockVersion, Expr::value(expected_version + 1))
            .col_expr(department::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(department::Column::Id.eq(id))
            .filter(department::Column::LockVersion.eq(expected_version))
            .filter(department::Column::ArchivedAt.is_not_null())
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Permanently delete the department row
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = DepartmentEntity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected)
    }

    /// Remove the head reference, bumping the version if one was set.
    pub async fn clear_head(&self, id: i32) -> AppResult<u64> {
        self.clear_head_where(
            department::Column::Id
                .eq(id)
                .and(department::Column::DepartmentHeadId.is_not_null()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Database;

    #[tokio::test]
    async fn stale_version_loses_the_archive_race() {
        let db = Database::in_memory().await.unwrap();
        let query = DepartmentQuery::new(db.connection());
        let dept = query
            .create(CreateDepartment {
                name: "Computer Studies".to_string(),
            })
            .await
            .unwrap();

        assert!(query.archive_versioned(dept.id, dept.lock_version).await.unwrap());
        // A second writer still holding the old version
        assert!(!query.restore_versioned(dept.id, dept.lock_version).await.unwrap());

        let current = query.find_by_id(dept.id, Scope::All).await.unwrap().unwrap();
        assert!(current.is_archived());
        assert_eq!(current.lock_version, dept.lock_version + 1);
        assert!(query.restore_versioned(dept.id, current.lock_version).await.unwrap());
    }
}
