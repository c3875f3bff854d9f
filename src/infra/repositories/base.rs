//! Shared query building blocks for all repositories.
//!
//! Every school record is soft-archivable through a nullable `archived_at`
//! column, so scope filtering and pagination are written once here and
//! composed by each repository.

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, IntoCondition},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Select,
};

use crate::domain::Scope;
use crate::errors::AppResult;
use crate::types::PaginationParams;

/// Condition selecting the rows a [`Scope`] includes.
pub(crate) fn scope_condition<C: ColumnTrait>(archived_at: C, scope: Scope) -> Condition {
    match scope {
        Scope::Live => Condition::all().add(archived_at.is_null()),
        Scope::Archived => Condition::all().add(archived_at.is_not_null()),
        Scope::All => Condition::all(),
    }
}

/// Add an equality filter when the value is present.
pub(crate) fn filter_eq<E, C, V>(select: Select<E>, column: C, value: Option<V>) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
    V: Into<sea_orm::Value>,
{
    match value {
        Some(value) => select.filter(column.eq(value)),
        None => select,
    }
}

/// Fetch one page of `select` together with the total row count.
pub(crate) async fn fetch_page<'db, C, E>(
    select: Select<E>,
    conn: &'db C,
    params: &PaginationParams,
) -> AppResult<(Vec<E::Model>, u64)>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: Send + Sync + 'db,
{
    let paginator = select.paginate(conn, params.limit());
    let total = paginator.num_items().await?;
    let data = paginator.fetch_page(params.page() - 1).await?;
    Ok((data, total))
}

/// Bulk update setting `status` on every live row matching `condition`.
pub(crate) async fn set_status_where<C, E>(
    conn: &C,
    status_column: E::Column,
    updated_at_column: E::Column,
    archived_at_column: E::Column,
    status: &str,
    condition: impl IntoCondition,
) -> AppResult<u64>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let result = E::update_many()
        .col_expr(status_column, Expr::value(status))
        .col_expr(updated_at_column, Expr::value(Utc::now()))
        .filter(condition)
        .filter(archived_at_column.is_null())
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::entities::course;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn scope_condition_targets_archived_at() {
        let live = course::Entity::find()
            .filter(scope_condition(course::Column::ArchivedAt, Scope::Live))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(live.contains(r#""archived_at" IS NULL"#));

        let archived = course::Entity::find()
            .filter(scope_condition(course::Column::ArchivedAt, Scope::Archived))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(archived.contains(r#""archived_at" IS NOT NULL"#));

        let all = course::Entity::find()
            .filter(scope_condition(course::Column::ArchivedAt, Scope::All))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!all.contains("archived_at\" IS"));
    }
}
