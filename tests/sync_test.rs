//! Spreadsheet export and import through the CSV connector.

mod common;

use school_records::domain::{CourseFilter, FacultyFilter, FacultyPosition, RecordStatus};
use school_records::errors::AppError;
use school_records::services::{ServiceContainer, SheetEntity};
use school_records::types::PaginationParams;

use common::TestApp;

fn sheet_file(app: &TestApp, sheet: &str) -> std::path::PathBuf {
    app.sheets.path().join(format!("{}.csv", sheet))
}

#[tokio::test]
async fn export_writes_header_and_every_record() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    app.course(cs.id, "BSCS").await;
    let old = app.course(cs.id, "BS Old Curriculum").await;
    app.services.courses().archive(old.id).await.unwrap();

    let summary = app.services.sync().export(SheetEntity::Courses).await.unwrap();
    assert_eq!(summary.rows, 2);

    let text = std::fs::read_to_string(sheet_file(&app, "courses")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "id,name,status,department_id,archived_at");
    assert_eq!(lines.len(), 3);
    // Archived rows carry their timestamp
    assert!(lines.iter().any(|l| l.contains("BS Old Curriculum") && l.ends_with('Z')));
}

#[tokio::test]
async fn import_updates_by_id_and_creates_the_rest() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;

    let sheet = format!(
        "id,name,status,department_id,archived_at\n\
         {},BS Computer Science,inactive,{},\n\
         ,BS Data Science,,{},\n",
        bscs.id, cs.id, cs.id
    );
    std::fs::write(sheet_file(&app, "courses"), sheet).unwrap();

    let summary = app.services.sync().import(SheetEntity::Courses).await.unwrap();
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.created, 1);

    let renamed = app.services.courses().get(bscs.id, false).await.unwrap();
    assert_eq!(renamed.name, "BS Computer Science");
    assert_eq!(renamed.status, RecordStatus::Inactive);

    let courses = app
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
    assert_eq!(courses.meta.total, 2);
    let created = courses
        .data
        .iter()
        .find(|c| c.name == "BS Data Science")
        .unwrap();
    // Empty status cell takes the default
    assert_eq!(created.status, RecordStatus::Active);
}

#[tokio::test]
async fn failing_row_rolls_back_the_whole_sheet() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;

    let sheet = format!(
        "id,name,status,department_id,archived_at\n\
         {},Renamed,active,{},\n\
         ,Orphan,active,999,\n",
        bscs.id, cs.id
    );
    std::fs::write(sheet_file(&app, "courses"), sheet).unwrap();

    let err = app
        .services
        .sync()
        .import(SheetEntity::Courses)
        .await
        .unwrap_err();
    match err {
        AppError::Validation(msg) => assert!(msg.starts_with("Row 3:"), "got {}", msg),
        other => panic!("expected validation error, got {:?}", other),
    }

    let unchanged = app.services.courses().get(bscs.id, false).await.unwrap();
    assert_eq!(unchanged.name, "BSCS");
}

#[tokio::test]
async fn department_import_assigns_the_head() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let carol = app.faculty("Carol", cs.id, FacultyPosition::Instructor).await;

    let sheet = format!(
        "id,name,department_head_id,archived_at\n{},Computer Studies,{},\n",
        cs.id, carol.id
    );
    std::fs::write(sheet_file(&app, "departments"), sheet).unwrap();

    let summary = app
        .services
        .sync()
        .import(SheetEntity::Departments)
        .await
        .unwrap();
    assert_eq!(summary.updated, 1);

    let dept = app.services.departments().get(cs.id, false).await.unwrap();
    assert_eq!(dept.department_head_id, Some(carol.id));
    let carol = app.services.faculty().get(carol.id, false).await.unwrap();
    assert_eq!(carol.position, FacultyPosition::DepartmentHead);
}

#[tokio::test]
async fn blank_head_cell_demotes_the_sitting_head() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let bob = app.faculty("Bob", cs.id, FacultyPosition::DepartmentHead).await;

    let sheet = format!(
        "id,name,department_head_id,archived_at\n{},Computer Studies,,\n",
        cs.id
    );
    std::fs::write(sheet_file(&app, "departments"), sheet).unwrap();
    app.services
        .sync()
        .import(SheetEntity::Departments)
        .await
        .unwrap();

    let dept = app.services.departments().get(cs.id, false).await.unwrap();
    assert_eq!(dept.department_head_id, None);

    // Listing publishes no events, so this reads the imported state
    let members = app
        .services
        .faculty()
        .list(
            FacultyFilter {
                department_id: Some(cs.id),
                ..Default::default()
            },
            PaginationParams::default(),
        )
        .await
        .unwrap();
    let bob = members.data.iter().find(|f| f.id == bob.id).unwrap();
    assert_eq!(bob.position, FacultyPosition::Instructor);
}

#[tokio::test]
async fn exported_sheets_import_back_without_changes() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;
    app.academic_year("2024-2025").await;
    app.student("2024-00001", "Alice", cs.id, bscs.id).await;
    app.faculty("Bob", cs.id, FacultyPosition::DepartmentHead).await;

    for entity in SheetEntity::ALL {
        app.services.sync().export(entity).await.unwrap();
    }
    for entity in SheetEntity::ALL {
        let summary = app.services.sync().import(entity).await.unwrap();
        assert_eq!(summary.created, 0, "{} created rows", entity);
    }

    let dept = app.services.departments().get(cs.id, false).await.unwrap();
    assert!(dept.department_head_id.is_some());
}

#[tokio::test]
async fn missing_sheet_is_an_external_failure() {
    let app = TestApp::new().await;
    let result = app.services.sync().import(SheetEntity::Faculty).await;
    assert!(matches!(result, Err(AppError::ExternalService(_))));
}
