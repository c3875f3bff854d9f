//! Academic year repository with soft archive support.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::base::{fetch_page, scope_condition};
use super::entities::academic_year::{self, ActiveModel, Entity as AcademicYearEntity};
use crate::domain::{AcademicYear, AcademicYearFilter, CreateAcademicYear, Scope, UpdateAcademicYear};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Academic year repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AcademicYearRepository: Send + Sync {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<AcademicYear>>;

    /// List one page, newest school year first
    async fn list(
        &self,
        filter: AcademicYearFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<AcademicYear>, u64)>;

    async fn list_all(&self) -> AppResult<Vec<AcademicYear>>;

    async fn create(&self, input: CreateAcademicYear) -> AppResult<AcademicYear>;

    async fn update(&self, id: i32, changes: UpdateAcademicYear) -> AppResult<AcademicYear>;

    async fn archive(&self, id: i32) -> AppResult<bool>;

    async fn restore(&self, id: i32) -> AppResult<bool>;

    async fn delete(&self, id: i32) -> AppResult<u64>;
}

/// Concrete implementation of AcademicYearRepository
pub struct AcademicYearStore {
    db: DatabaseConnection,
}

impl AcademicYearStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AcademicYearRepository for AcademicYearStore {
    async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<AcademicYear>> {
        AcademicYearQuery::new(&self.db).find_by_id(id, scope).await
    }

    async fn list(
        &self,
        filter: AcademicYearFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<AcademicYear>, u64)> {
        AcademicYearQuery::new(&self.db).list(&filter, &page).await
    }

    async fn list_all(&self) -> AppResult<Vec<AcademicYear>> {
        AcademicYearQuery::new(&self.db).list_all().await
    }

    async fn create(&self, input: CreateAcademicYear) -> AppResult<AcademicYear> {
        AcademicYearQuery::new(&self.db).create(input).await
    }

    async fn update(&self, id: i32, changes: UpdateAcademicYear) -> AppResult<AcademicYear> {
        AcademicYearQuery::new(&self.db)
            .update(id, changes, Scope::Live)
            .await
    }

    async fn archive(&self, id: i32) -> AppResult<bool> {
        let now = Utc::now();
        let result = AcademicYearEntity::update_many()
            .col_expr(academic_year::Column::ArchivedAt, Expr::value(Some(now)))
            .col_expr(academic_year::Column::UpdatedAt, Expr::value(now))
            .filter(academic_year::Column::Id.eq(id))
            .filter(academic_year::Column::ArchivedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn restore(&self, id: i32) -> AppResult<bool> {
        let result = AcademicYearEntity::update_many()
            .col_expr(
                academic_year::Column::ArchivedAt,
                Expr::value(None::<DateTime<Utc>>),
            )
            .col_expr(academic_year::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(academic_year::Column::Id.eq(id))
            .filter(academic_year::Column::ArchivedAt.is_not_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = AcademicYearEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

/// Academic year queries over any connection, pooled or transactional.
pub struct AcademicYearQuery<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> AcademicYearQuery<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32, scope: Scope) -> AppResult<Option<AcademicYear>> {
        let result = AcademicYearEntity::find_by_id(id)
            .filter(scope_condition(academic_year::Column::ArchivedAt, scope))
            .one(self.conn)
            .await?;

        Ok(result.map(AcademicYear::from))
    }

    pub async fn list(
        &self,
        filter: &AcademicYearFilter,
        page: &PaginationParams,
    ) -> AppResult<(Vec<AcademicYear>, u64)> {
        let select = AcademicYearEntity::find()
            .filter(scope_condition(academic_year::Column::ArchivedAt, filter.scope))
            .order_by_desc(academic_year::Column::SchoolYear);

        let (models, total) = fetch_page(select, self.conn, page).await?;
        Ok((models.into_iter().map(AcademicYear::from).collect(), total))
    }

    pub async fn list_all(&self) -> AppResult<Vec<AcademicYear>> {
        let models = AcademicYearEntity::find()
            .order_by_asc(academic_year::Column::Id)
            .all(self.conn)
            .await?;

        Ok(models.into_iter().map(AcademicYear::from).collect())
    }

    pub async fn create(&self, input: CreateAcademicYear) -> AppResult<AcademicYear> {
        let now = Utc::now();
        let active_model = ActiveModel {
            school_year: Set(input.school_year),
            created_at: Set(now),
            updated_at: Set(now),
            archived_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(self.conn)
            .await
            .map_err(|e| AppError::from(e).unique_violation("School year"))?;
        Ok(AcademicYear::from(model))
    }

    pub async fn update(
        &self,
        id: i32,
        changes: UpdateAcademicYear,
        scope: Scope,
    ) -> AppResult<AcademicYear> {
        let found = AcademicYearEntity::find_by_id(id)
            .filter(scope_condition(academic_year::Column::ArchivedAt, scope))
            .one(self.conn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = found.into();
        if let Some(school_year) = changes.school_year {
            active.school_year = Set(school_year);
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.conn)
            .await
            .map_err(|e| AppError::from(e).unique_violation("School year"))?;
        Ok(AcademicYear::from(model))
    }

    /// Overwrite every editable field; archive state is kept.
    pub async fn replace(&self, id: i32, input: CreateAcademicYear) -> AppResult<AcademicYear> {
        self.update(
            id,
            UpdateAcademicYear {
                school_year: Some(input.school_year),
            },
            Scope::All,
        )
        .await
    }
}
