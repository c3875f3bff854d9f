//! Department archive, restore and destroy cascades against SQLite.

mod common;

use school_records::domain::{
    CourseFilter, FacultyPosition, LifecycleOutcome, RecordStatus, Scope, StudentStatus,
    UpdateStudent,
};
use school_records::errors::AppError;
use school_records::services::ServiceContainer;
use school_records::types::PaginationParams;

use common::TestApp;

#[tokio::test]
async fn archive_cascades_to_courses_faculty_and_students() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;
    let alice = app.student("2024-00001", "Alice", cs.id, bscs.id).await;
    let bob = app.faculty("Bob", cs.id, FacultyPosition::Instructor).await;

    let outcome = app.services.departments().archive(cs.id).await.unwrap();
    assert_eq!(outcome, LifecycleOutcome::Archived);

    let dept = app.services.departments().get(cs.id, true).await.unwrap();
    assert!(dept.is_archived());

    let course = app.services.courses().get(bscs.id, true).await.unwrap();
    assert!(course.lifecycle.is_archived());

    let student = app.services.students().get(alice.id, false).await.unwrap();
    assert_eq!(student.status, StudentStatus::Inactive);
    assert!(student.lifecycle.is_active());

    let faculty = app.services.faculty().get(bob.id, false).await.unwrap();
    assert_eq!(faculty.status, RecordStatus::Inactive);

    // Archived records drop out of live listings
    let live = app
        .services
        .courses()
        .list(
            CourseFilter {
                department_id: Some(cs.id),
                ..Default::default()
            },
            PaginationParams::default(),
        )
        .await
        .unwrap();
    assert!(live.data.is_empty());

    let archived = app
        .services
        .courses()
        .list(
            CourseFilter {
                department_id: Some(cs.id),
                scope: Scope::Archived,
                ..Default::default()
            },
            PaginationParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(archived.meta.total, 1);
}

#[tokio::test]
async fn archive_twice_and_restore_twice_are_noops() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let departments = app.services.departments();

    assert_eq!(
        departments.restore(cs.id).await.unwrap(),
        LifecycleOutcome::NotArchived
    );
    assert_eq!(
        departments.archive(cs.id).await.unwrap(),
        LifecycleOutcome::Archived
    );
    assert_eq!(
        departments.archive(cs.id).await.unwrap(),
        LifecycleOutcome::AlreadyArchived
    );
    assert_eq!(
        departments.restore(cs.id).await.unwrap(),
        LifecycleOutcome::Restored
    );
    assert_eq!(
        departments.restore(cs.id).await.unwrap(),
        LifecycleOutcome::NotArchived
    );
}

#[tokio::test]
async fn restore_reverses_the_cascade() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;
    let alice = app.student("2024-00001", "Alice", cs.id, bscs.id).await;
    let bob = app.faculty("Bob", cs.id, FacultyPosition::Instructor).await;

    app.services.departments().archive(cs.id).await.unwrap();
    app.services.departments().restore(cs.id).await.unwrap();

    let dept = app.services.departments().get(cs.id, false).await.unwrap();
    assert!(!dept.is_archived());
    let course = app.services.courses().get(bscs.id, false).await.unwrap();
    assert!(course.lifecycle.is_active());
    let student = app.services.students().get(alice.id, false).await.unwrap();
    assert_eq!(student.status, StudentStatus::Active);
    let faculty = app.services.faculty().get(bob.id, false).await.unwrap();
    assert_eq!(faculty.status, RecordStatus::Active);
}

#[tokio::test]
async fn restore_brings_back_every_archived_course_of_the_department() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;
    let old = app.course(cs.id, "BS Old Curriculum").await;

    app.services.courses().archive(old.id).await.unwrap();
    app.services.departments().archive(cs.id).await.unwrap();
    app.services.departments().restore(cs.id).await.unwrap();

    let bscs = app.services.courses().get(bscs.id, false).await.unwrap();
    assert!(bscs.lifecycle.is_active());
    // Archived before the department was, restored with it anyway
    let old = app.services.courses().get(old.id, false).await.unwrap();
    assert!(old.lifecycle.is_active());
}

#[tokio::test]
async fn cross_department_students_are_reactivated_but_not_deactivated() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let eng = app.department("Engineering").await;
    let bscs = app.course(cs.id, "BSCS").await;
    // Belongs to Engineering but takes a Computer Studies course
    let dana = app.student("2024-00002", "Dana", eng.id, bscs.id).await;

    app.services.departments().archive(cs.id).await.unwrap();
    let after_archive = app.services.students().get(dana.id, false).await.unwrap();
    assert_eq!(after_archive.status, StudentStatus::Active);

    app.services
        .students()
        .update(
            dana.id,
            UpdateStudent {
                status: Some(StudentStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    app.services.departments().restore(cs.id).await.unwrap();
    let after_restore = app.services.students().get(dana.id, false).await.unwrap();
    assert_eq!(after_restore.status, StudentStatus::Active);
}

#[tokio::test]
async fn destroy_removes_everything_under_the_department() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let eng = app.department("Engineering").await;
    let bscs = app.course(cs.id, "BSCS").await;
    let alice = app.student("2024-00001", "Alice", cs.id, bscs.id).await;
    let dana = app.student("2024-00002", "Dana", eng.id, bscs.id).await;
    let bob = app.faculty("Bob", cs.id, FacultyPosition::Instructor).await;
    let eve = app.faculty("Eve", eng.id, FacultyPosition::Instructor).await;

    let summary = app.services.departments().destroy(cs.id).await.unwrap();
    assert_eq!(summary.courses, 1);
    assert_eq!(summary.students, 2);
    assert_eq!(summary.faculty, 1);

    for result in [
        app.services.departments().get(cs.id, true).await.map(|_| ()),
        app.services.courses().get(bscs.id, true).await.map(|_| ()),
        app.services.students().get(alice.id, true).await.map(|_| ()),
        app.services.students().get(dana.id, true).await.map(|_| ()),
        app.services.faculty().get(bob.id, true).await.map(|_| ()),
    ] {
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    // Other departments are untouched
    assert!(app.services.departments().get(eng.id, false).await.is_ok());
    assert!(app.services.faculty().get(eve.id, false).await.is_ok());
}

#[tokio::test]
async fn destroy_missing_department_is_not_found() {
    let app = TestApp::new().await;
    let result = app.services.departments().destroy(404).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn archived_department_is_hidden_from_live_lookup() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    app.services.departments().archive(cs.id).await.unwrap();

    let live = app.services.departments().get(cs.id, false).await;
    assert!(matches!(live, Err(AppError::NotFound)));
    assert!(app.services.departments().get(cs.id, true).await.is_ok());
}

#[tokio::test]
async fn failed_archive_leaves_every_record_untouched() {
    use sea_orm::ConnectionTrait;

    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;
    let alice = app.student("2024-00001", "Alice", cs.id, bscs.id).await;
    let bob = app.faculty("Bob", cs.id, FacultyPosition::Instructor).await;

    // The department row is written last, after every dependent update
    app.database
        .connection()
        .execute_unprepared(
            "CREATE TRIGGER reject_department_archive \
             BEFORE UPDATE OF archived_at ON departments \
             BEGIN SELECT RAISE(ABORT, 'archive rejected'); END;",
        )
        .await
        .unwrap();

    let err = app.services.departments().archive(cs.id).await.unwrap_err();
    assert!(
        matches!(err, AppError::Cascade { operation: "archive department", .. }),
        "got {:?}",
        err
    );

    let dept = app.services.departments().get(cs.id, false).await.unwrap();
    assert!(!dept.is_archived());
    let course = app.services.courses().get(bscs.id, false).await.unwrap();
    assert!(course.lifecycle.is_active());
    let student = app.services.students().get(alice.id, false).await.unwrap();
    assert_eq!(student.status, StudentStatus::Active);
    let faculty = app.services.faculty().get(bob.id, false).await.unwrap();
    assert_eq!(faculty.status, RecordStatus::Active);
}
