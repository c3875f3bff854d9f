//! Faculty service - faculty CRUD publishing head-related events.
//!
//! Department head bookkeeping is not done inline: each write publishes a
//! [`DomainEvent`] after it commits and the subscribed handlers reconcile.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use super::events::EventBus;
use super::lifecycle::{archive_record, restore_record};
use super::references::require_department;
use crate::domain::{
    CreateFaculty, DomainEvent, FacultyFilter, FacultyProfile, LifecycleOutcome, Scope,
    UpdateFaculty,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait FacultyService: Send + Sync {
    async fn create(&self, input: CreateFaculty) -> AppResult<FacultyProfile>;

    /// Fetch a faculty member. Viewing a live record re-asserts head rules.
    async fn get(&self, id: i32, include_archived: bool) -> AppResult<FacultyProfile>;

    async fn list(
        &self,
        filter: FacultyFilter,
        page: PaginationParams,
    ) -> AppResult<Paginated<FacultyProfile>>;

    async fn update(&self, id: i32, changes: UpdateFaculty) -> AppResult<FacultyProfile>;

    async fn archive(&self, id: i32) -> AppResult<LifecycleOutcome>;

    async fn restore(&self, id: i32) -> AppResult<LifecycleOutcome>;

    /// Hard delete, clearing any department head reference to it
    async fn destroy(&self, id: i32) -> AppResult<()>;
}

pub struct FacultyManager<U: UnitOfWork> {
    uow: Arc<U>,
    events: EventBus,
}

impl<U: UnitOfWork> FacultyManager<U> {
    pub fn new(uow: Arc<U>, events: EventBus) -> Self {
        Self { uow, events }
    }
}

#[async_trait]
impl<U: UnitOfWork> FacultyService for FacultyManager<U> {
    async fn create(&self, input: CreateFaculty) -> AppResult<FacultyProfile> {
        input.validate()?;
        require_department(&*self.uow, input.department_id).await?;

        let faculty = self.uow.faculty().create(input).await?;
        self.events
            .publish(DomainEvent::FacultyPositionChanged {
                faculty_id: faculty.id,
                department_id: faculty.department_id,
                position: faculty.position,
                previous_department_id: None,
                previous_position: None,
            })
            .await;

        Ok(faculty)
    }

    async fn get(&self, id: i32, include_archived: bool) -> AppResult<FacultyProfile> {
        let faculty = self
            .uow
            .faculty()
            .find_by_id(id, Scope::for_lookup(include_archived))
            .await?
            .ok_or_not_found()?;

        if faculty.lifecycle.is_active() {
            self.events
                .publish(DomainEvent::FacultyViewed {
                    faculty_id: faculty.id,
                    department_id: faculty.department_id,
                    position: faculty.position,
                })
                .await;
        }

        Ok(faculty)
    }

    async fn list(
        &self,
        filter: FacultyFilter,
        page: PaginationParams,
    ) -> AppResult<Paginated<FacultyProfile>> {
        let (rows, total) = self.uow.faculty().list(filter, page).await?;
        Ok(Paginated::new(rows, &page, total))
    }

    async fn update(&self, id: i32, changes: UpdateFaculty) -> AppResult<FacultyProfile> {
        changes.validate()?;

        let repo = self.uow.faculty();
        let before = repo
            .find_by_id(id, Scope::Live)
            .await?
            .ok_or_not_found()?;
        require_department(&*self.uow, changes.department_id).await?;

        let faculty = repo.update(id, changes).await?;
        self.events
            .publish(DomainEvent::FacultyPositionChanged {
                faculty_id: faculty.id,
                department_id: faculty.department_id,
                position: faculty.position,
                previous_department_id: before.department_id,
                previous_position: Some(before.position),
            })
            .await;

        Ok(faculty)
    }

    async fn archive(&self, id: i32) -> AppResult<LifecycleOutcome> {
        let repo = self.uow.faculty();
        let current = repo.find_by_id(id, Scope::All).await?;
        let department_id = current.as_ref().and_then(|f| f.department_id);

        let outcome =
            archive_record(current.map(|f| f.lifecycle), || repo.archive(id)).await?;
        if outcome == LifecycleOutcome::Archived {
            self.events
                .publish(DomainEvent::FacultyArchived {
                    faculty_id: id,
                    department_id,
                })
                .await;
        }

        Ok(outcome)
    }

    async fn restore(&self, id: i32) -> AppResult<LifecycleOutcome> {
        let repo = self.uow.faculty();
        let current = repo.find_by_id(id, Scope::All).await?;
        let placement = current.as_ref().map(|f| (f.department_id, f.position));

        let outcome =
            restore_record(current.map(|f| f.lifecycle), || repo.restore(id)).await?;
        if let (LifecycleOutcome::Restored, Some((department_id, position))) = (outcome, placement)
        {
            // A restored head reclaims its department
            self.events
                .publish(DomainEvent::FacultyViewed {
                    faculty_id: id,
                    department_id,
                    position,
                })
                .await;
        }

        Ok(outcome)
    }

    async fn destroy(&self, id: i32) -> AppResult<()> {
        let deleted = crate::with_transaction!(self.uow, |ctx| {
            ctx.departments().clear_head_references(id).await?;
            ctx.faculty().delete(id).await
        })?;

        if deleted == 0 {
            return Err(AppError::NotFound);
        }
        tracing::info!(faculty_id = id, "Faculty destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FacultyPosition;
    use crate::services::events::MockEventHandler;
    use crate::services::testing::{self, TestUnitOfWork};
    use mockall::predicate::eq;

    fn recording_bus(expected: fn(&DomainEvent) -> bool, times: usize) -> EventBus {
        let mut handler = MockEventHandler::new();
        handler.expect_name().return_const("recorder");
        handler
            .expect_handle()
            .withf(move |event| expected(event))
            .times(times)
            .returning(|_| Ok(()));
        EventBus::new().with_handler(Arc::new(handler))
    }

    #[tokio::test]
    async fn update_publishes_previous_and_new_placement() {
        let mut uow = TestUnitOfWork::default();
        uow.faculty
            .expect_find_by_id()
            .with(eq(7), eq(Scope::Live))
            .returning(|id, _| Ok(Some(testing::faculty(id, Some(1), FacultyPosition::DepartmentHead))));
        uow.departments
            .expect_find_by_id()
            .with(eq(2), eq(Scope::Live))
            .returning(|id, _| Ok(Some(testing::department(id))));
        uow.faculty
            .expect_update()
            .returning(|id, _| Ok(testing::faculty(id, Some(2), FacultyPosition::DepartmentHead)));

        let bus = recording_bus(
            |event| {
                matches!(
                    event,
                    DomainEvent::FacultyPositionChanged {
                        faculty_id: 7,
                        department_id: Some(2),
                        previous_department_id: Some(1),
                        previous_position: Some(FacultyPosition::DepartmentHead),
                        ..
                    }
                )
            },
            1,
        );

        let service = FacultyManager::new(uow.build(), bus);
        let changes = UpdateFaculty {
            department_id: Some(2),
            ..Default::default()
        };

        assert_eq!(service.update(7, changes).await.unwrap().department_id, Some(2));
    }

    #[tokio::test]
    async fn viewing_archived_faculty_publishes_nothing() {
        let mut uow = TestUnitOfWork::default();
        uow.faculty.expect_find_by_id().returning(|id, _| {
            let mut faculty = testing::faculty(id, Some(1), FacultyPosition::DepartmentHead);
            faculty.lifecycle = testing::archived();
            Ok(Some(faculty))
        });

        let service = FacultyManager::new(uow.build(), recording_bus(|_| true, 0));

        assert!(service.get(7, true).await.is_ok());
    }

    #[tokio::test]
    async fn viewing_live_faculty_publishes_viewed() {
        let mut uow = TestUnitOfWork::default();
        uow.faculty
            .expect_find_by_id()
            .returning(|id, _| Ok(Some(testing::faculty(id, Some(1), FacultyPosition::Instructor))));

        let bus = recording_bus(|event| matches!(event, DomainEvent::FacultyViewed { .. }), 1);
        let service = FacultyManager::new(uow.build(), bus);

        assert!(service.get(7, false).await.is_ok());
    }

    #[tokio::test]
    async fn failed_reconciliation_does_not_fail_the_write() {
        let mut uow = TestUnitOfWork::default();
        uow.faculty
            .expect_create()
            .returning(|_| Ok(testing::faculty(11, None, FacultyPosition::Dean)));

        let mut handler = MockEventHandler::new();
        handler.expect_name().return_const("broken");
        handler
            .expect_handle()
            .returning(|_| Err(AppError::internal("reconciler down")));

        let service = FacultyManager::new(
            uow.build(),
            EventBus::new().with_handler(Arc::new(handler)),
        );
        let created = service
            .create(CreateFaculty {
                first_name: "Dana".to_string(),
                middle_name: None,
                last_name: "Lim".to_string(),
                email: "dana@school.edu".to_string(),
                position: FacultyPosition::Dean,
                status: Default::default(),
                department_id: None,
            })
            .await
            .unwrap();

        assert_eq!(created.id, 11);
    }

    #[tokio::test]
    async fn archive_announces_only_real_changes() {
        let mut uow = TestUnitOfWork::default();
        uow.faculty
            .expect_find_by_id()
            .returning(|id, _| Ok(Some(testing::faculty(id, Some(3), FacultyPosition::DepartmentHead))));
        uow.faculty.expect_archive().returning(|_| Ok(true));

        let bus = recording_bus(
            |event| {
                *event
                    == DomainEvent::FacultyArchived {
                        faculty_id: 7,
                        department_id: Some(3),
                    }
            },
            1,
        );
        let service = FacultyManager::new(uow.build(), bus);

        assert_eq!(service.archive(7).await.unwrap(), LifecycleOutcome::Archived);
    }
}
