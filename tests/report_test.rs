//! Student and faculty reports over a seeded database.

mod common;

use school_records::domain::{
    CreateStudent, FacultyPosition, StudentStatus, UpdateStudent,
};
use school_records::errors::AppError;
use school_records::services::{FacultyReportFilter, ServiceContainer, StudentReportFilter};

use common::TestApp;

#[tokio::test]
async fn student_report_applies_every_filter_and_labels_them() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;
    let bsit = app.course(cs.id, "BSIT").await;
    let year = app.academic_year("2024-2025").await;

    app.services
        .students()
        .create(CreateStudent {
            student_number: "2024-00001".to_string(),
            first_name: "Alice".to_string(),
            middle_name: Some("Marie".to_string()),
            last_name: "Santos".to_string(),
            status: StudentStatus::Active,
            department_id: Some(cs.id),
            course_id: Some(bscs.id),
            academic_year_id: Some(year.id),
            year_level: 2,
        })
        .await
        .unwrap();
    app.student("2024-00002", "Reyes", cs.id, bsit.id).await;
    let graduate = app.student("2024-00003", "Cruz", cs.id, bscs.id).await;
    app.services
        .students()
        .update(
            graduate.id,
            UpdateStudent {
                status: Some(StudentStatus::Graduated),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let report = app
        .services
        .reports()
        .students(StudentReportFilter {
            course_id: Some(bscs.id),
            status: Some(StudentStatus::Active),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(report.labels.course, "BSCS");
    assert_eq!(report.labels.department, "All");
    assert_eq!(report.labels.academic_year, "All");
    assert_eq!(report.labels.status, "active");
    assert_eq!(report.rows.len(), 1);

    let row = &report.rows[0];
    assert_eq!(row.name, "Santos, Alice M.");
    assert_eq!(row.course.as_deref(), Some("BSCS"));
    assert_eq!(row.department.as_deref(), Some("Computer Studies"));
    assert_eq!(row.year_level, 2);
}

#[tokio::test]
async fn student_report_excludes_archived_students() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;
    let kept = app.student("2024-00001", "Kept", cs.id, bscs.id).await;
    let gone = app.student("2024-00002", "Gone", cs.id, bscs.id).await;
    app.services.students().archive(gone.id).await.unwrap();

    let report = app
        .services
        .reports()
        .students(StudentReportFilter::default())
        .await
        .unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].student_number, kept.student_number);
}

#[tokio::test]
async fn archived_course_still_resolves_as_a_label() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;
    app.services.courses().archive(bscs.id).await.unwrap();

    let report = app
        .services
        .reports()
        .students(StudentReportFilter {
            course_id: Some(bscs.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(report.labels.course, "BSCS");
}

#[tokio::test]
async fn unknown_filter_reference_is_not_found() {
    let app = TestApp::new().await;
    let result = app
        .services
        .reports()
        .students(StudentReportFilter {
            department_id: Some(99),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn faculty_report_renders_csv_for_one_department() {
    let app = TestApp::new().await;
    let cs = app.department("Computer Studies").await;
    let eng = app.department("Engineering").await;
    app.faculty("Bob", cs.id, FacultyPosition::DepartmentHead).await;
    app.faculty("Eve", eng.id, FacultyPosition::Instructor).await;

    let filter = FacultyReportFilter {
        department_id: Some(cs.id),
    };
    let report = app.services.reports().faculty(filter).await.unwrap();
    assert_eq!(report.department, "Computer Studies");
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].position, "Department Head");

    let document = app.services.reports().render_faculty(filter).await.unwrap();
    assert!(document.filename.starts_with("faculty-report-"));
    assert!(document.filename.ends_with(".csv"));

    let text = String::from_utf8(document.bytes).unwrap();
    assert!(text.starts_with("Faculty Report"));
    assert!(text.contains("bob@school.edu"));
    assert!(!text.contains("eve@school.edu"));
}
