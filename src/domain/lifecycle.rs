//! Soft-archive lifecycle shared by every school record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of an archivable record.
///
/// Stored as a nullable `archived_at` column; `None` maps to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Lifecycle {
    Active,
    Archived { since: DateTime<Utc> },
}

impl Lifecycle {
    pub fn is_archived(&self) -> bool {
        matches!(self, Lifecycle::Archived { .. })
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }

    /// Column value for this state.
    pub fn archived_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Archived { since } => Some(*since),
        }
    }
}

impl From<Option<DateTime<Utc>>> for Lifecycle {
    fn from(archived_at: Option<DateTime<Utc>>) -> Self {
        match archived_at {
            Some(since) => Lifecycle::Archived { since },
            None => Lifecycle::Active,
        }
    }
}

/// Which lifecycle states a query includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Only records that are not archived
    #[default]
    Live,
    /// Only archived records
    Archived,
    /// Every record regardless of state
    All,
}

impl Scope {
    /// Scope for single-record lookups with an `include_archived` flag.
    pub fn for_lookup(include_archived: bool) -> Self {
        if include_archived {
            Scope::All
        } else {
            Scope::Live
        }
    }
}

/// Result of an archive or restore request.
///
/// Requests against a record already in the target state are successful
/// no-ops rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleOutcome {
    Archived,
    Restored,
    AlreadyArchived,
    NotArchived,
}

impl LifecycleOutcome {
    /// True when nothing was changed.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            LifecycleOutcome::AlreadyArchived | LifecycleOutcome::NotArchived
        )
    }

    /// Human readable confirmation, e.g. "Department archived".
    pub fn message(&self, entity: &str) -> String {
        match self {
            LifecycleOutcome::Archived => format!("{} archived", entity),
            LifecycleOutcome::Restored => format!("{} restored", entity),
            LifecycleOutcome::AlreadyArchived => format!("{} is already archived", entity),
            LifecycleOutcome::NotArchived => format!("{} is not archived", entity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_round_trips_through_column_value() {
        let now = Utc::now();
        let archived = Lifecycle::from(Some(now));

        assert!(archived.is_archived());
        assert_eq!(archived.archived_at(), Some(now));
        assert_eq!(Lifecycle::from(None), Lifecycle::Active);
        assert_eq!(Lifecycle::Active.archived_at(), None);
    }

    #[test]
    fn noop_outcomes_are_flagged() {
        assert!(LifecycleOutcome::AlreadyArchived.is_noop());
        assert!(LifecycleOutcome::NotArchived.is_noop());
        assert!(!LifecycleOutcome::Archived.is_noop());
        assert_eq!(
            LifecycleOutcome::AlreadyArchived.message("Department"),
            "Department is already archived"
        );
    }

    #[test]
    fn scope_defaults_to_live() {
        assert_eq!(Scope::default(), Scope::Live);
        assert_eq!(Scope::for_lookup(true), Scope::All);
        assert_eq!(Scope::for_lookup(false), Scope::Live);
    }
}
