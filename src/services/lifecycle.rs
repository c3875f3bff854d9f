//! Archive and restore outcomes for single records.

use std::future::Future;

use crate::domain::{Lifecycle, LifecycleOutcome};
use crate::errors::{AppError, AppResult};

/// Archive a record whose current state is `current` (`None` = missing).
///
/// `archive` performs the guarded write and reports whether a row changed.
pub(crate) async fn archive_record<F, Fut>(
    current: Option<Lifecycle>,
    archive: F,
) -> AppResult<LifecycleOutcome>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<bool>>,
{
    if current.ok_or(AppError::NotFound)?.is_archived() {
        return Ok(LifecycleOutcome::AlreadyArchived);
    }

    // A false result means another writer archived it first
    match archive().await? {
        true => Ok(LifecycleOutcome::Archived),
        false => Ok(LifecycleOutcome::AlreadyArchived),
    }
}

/// Restore a record whose current state is `current` (`None` = missing).
pub(crate) async fn restore_record<F, Fut>(
    current: Option<Lifecycle>,
    restore: F,
) -> AppResult<LifecycleOutcome>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<bool>>,
{
    if current.ok_or(AppError::NotFound)?.is_active() {
        return Ok(LifecycleOutcome::NotArchived);
    }

    match restore().await? {
        true => Ok(LifecycleOutcome::Restored),
        false => Ok(LifecycleOutcome::NotArchived),
    }
}
