//! Unit of Work pattern implementation.
//!
//! Centralizes access to every repository and owns the transaction
//! lifecycle, so multi-record workflows (department cascades, head
//! reassignment, spreadsheet imports) commit or roll back as one.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend,
    IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    AcademicYearQuery, AcademicYearRepository, AcademicYearStore, CourseQuery, CourseRepository,
    CourseStore, DepartmentQuery, DepartmentRepository, DepartmentStore, FacultyQuery,
    FacultyRepository, FacultyStore, StudentQuery, StudentRepository, StudentStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, hand-write a test implementation over the mock repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn departments(&self) -> Arc<dyn DepartmentRepository>;

    fn courses(&self) -> Arc<dyn CourseRepository>;

    fn academic_years(&self) -> Arc<dyn AcademicYearRepository>;

    fn students(&self) -> Arc<dyn StudentRepository>;

    fn faculty(&self) -> Arc<dyn FacultyRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a serializable transaction.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All queries built from this context run on the same transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn departments(&self) -> DepartmentQuery<'_, DatabaseTransaction> {
        DepartmentQuery::new(self.txn)
    }

    pub fn courses(&self) -> CourseQuery<'_, DatabaseTransaction> {
        CourseQuery::new(self.txn)
    }

    pub fn academic_years(&self) -> AcademicYearQuery<'_, DatabaseTransaction> {
        AcademicYearQuery::new(self.txn)
    }

    pub fn students(&self) -> StudentQuery<'_, DatabaseTransaction> {
        StudentQuery::new(self.txn)
    }

    pub fn faculty(&self) -> FacultyQuery<'_, DatabaseTransaction> {
        FacultyQuery::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    department_repo: Arc<DepartmentStore>,
    course_repo: Arc<CourseStore>,
    academic_year_repo: Arc<AcademicYearStore>,
    student_repo: Arc<StudentStore>,
    faculty_repo: Arc<FacultyStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            department_repo: Arc::new(DepartmentStore::new(db.clone())),
            course_repo: Arc::new(CourseStore::new(db.clone())),
            academic_year_repo: Arc::new(AcademicYearStore::new(db.clone())),
            student_repo: Arc::new(StudentStore::new(db.clone())),
            faculty_repo: Arc::new(FacultyStore::new(db.clone())),
            db,
        }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // SQLite transactions are always serializable and take no options
        let txn = match self.db.get_database_backend() {
            DbBackend::Sqlite => self.db.begin().await,
            _ => {
                self.db
                    .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
                    .await
            }
        }
        .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.department_repo.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.course_repo.clone()
    }

    fn academic_years(&self) -> Arc<dyn AcademicYearRepository> {
        self.academic_year_repo.clone()
    }

    fn students(&self) -> Arc<dyn StudentRepository> {
        self.student_repo.clone()
    }

    fn faculty(&self) -> Arc<dyn FacultyRepository> {
        self.faculty_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Run `$body` inside `$uow.transaction`, binding the context to `$ctx`.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
