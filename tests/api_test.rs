//! HTTP API tests against an in-memory database.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use school_records::api::{create_router, AppState};

use common::TestApp;

async fn router() -> (TestApp, Router) {
    let app = TestApp::new().await;
    let state = AppState::from_container(app.database.clone(), &app.services);
    let router = create_router(state);
    (app, router)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(router, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_database_status() {
    let (_app, router) = router().await;
    let (status, body) = send_json(&router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (_app, router) = router().await;
    let (status, body) = send_json(&router, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/departments"].is_object());
}

#[tokio::test]
async fn department_crud_and_archive_messages() {
    let (_app, router) = router().await;

    let (status, created) = send_json(
        &router,
        Method::POST,
        "/departments",
        Some(json!({ "name": "Computer Studies" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Computer Studies");
    let id = created["id"].as_i64().unwrap();

    let (status, page) = send_json(&router, Method::GET, "/departments?per_page=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 1);
    assert_eq!(page["data"][0]["id"], id);

    let uri = format!("/departments/{}", id);
    let (status, archived) = send_json(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(archived["data"], "archived");
    assert_eq!(archived["message"], "Department archived");

    let (_, again) = send_json(&router, Method::DELETE, &uri, None).await;
    assert_eq!(again["data"], "already_archived");
    assert_eq!(again["message"], "Department is already archived");

    let (status, _) = send_json(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, found) = send_json(
        &router,
        Method::GET,
        &format!("{}?include_archived=true", uri),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["lifecycle"]["state"], "archived");

    let (status, restored) =
        send_json(&router, Method::POST, &format!("{}/restore", uri), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restored["message"], "Department restored");
}

#[tokio::test]
async fn department_destroy_returns_counts() {
    let (app, router) = router().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;
    app.student("2024-00001", "Alice", cs.id, bscs.id).await;

    let (status, body) = send_json(
        &router,
        Method::DELETE,
        &format!("/departments/{}/permanent", cs.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["courses"], 1);
    assert_eq!(body["data"]["students"], 1);
    assert_eq!(body["message"], "Department permanently deleted");
}

#[tokio::test]
async fn validation_and_unknown_references_are_bad_requests() {
    let (_app, router) = router().await;

    let (status, body) = send_json(&router, Method::POST, "/departments", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send_json(
        &router,
        Method::POST,
        "/courses",
        Some(json!({ "name": "BSCS", "department_id": 404 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &router,
        Method::POST,
        "/academic-years",
        Some(json!({ "school_year": "2024-2026" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "School year must look like 2024-2025");
}

#[tokio::test]
async fn duplicate_department_name_is_a_conflict() {
    let (app, router) = router().await;
    app.department("Computer Studies").await;

    let (status, body) = send_json(
        &router,
        Method::POST,
        "/departments",
        Some(json!({ "name": "Computer Studies" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn student_report_downloads_as_csv() {
    let (app, router) = router().await;
    let cs = app.department("Computer Studies").await;
    let bscs = app.course(cs.id, "BSCS").await;
    app.student("2024-00001", "Alice", cs.id, bscs.id).await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/reports/students?course_id={}&format=csv", bscs.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"student-report-"));
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("Course,BSCS"));
    assert!(text.contains("2024-00001"));
}

#[tokio::test]
async fn faculty_report_defaults_to_json() {
    let (app, router) = router().await;
    let cs = app.department("Computer Studies").await;
    app.faculty("Bob", cs.id, school_records::domain::FacultyPosition::Dean).await;

    let (status, body) = send_json(&router, Method::GET, "/reports/faculty", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["department"], "All");
    assert_eq!(body["rows"][0]["position"], "Dean");
}

#[tokio::test]
async fn sync_rejects_unknown_sheet_and_exports_known_ones() {
    let (app, router) = router().await;
    app.department("Computer Studies").await;

    let (status, body) = send_json(&router, Method::POST, "/sync/grades/export", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = send_json(&router, Method::POST, "/sync/departments/export", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entity"], "departments");
    assert_eq!(body["rows"], 1);
    assert!(app.sheets.path().join("departments.csv").exists());
}

#[tokio::test]
async fn importing_a_missing_sheet_is_a_bad_gateway() {
    let (_app, router) = router().await;
    let (status, body) = send_json(&router, Method::POST, "/sync/academic-years/import", None).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
}
