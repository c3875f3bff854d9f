//! Report service - filtered student and faculty listings.
//!
//! A report holds the resolved filter labels, the ordered rows and the
//! generation time. Rendering to a file is left to a [`DocumentRenderer`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::container::parallel;
use crate::config::REPORT_LABEL_ALL;
use crate::domain::{
    FacultyFilter, FacultyProfile, Scope, StudentFilter, StudentProfile, StudentStatus,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{DocumentRenderer, RenderedDocument, ReportDocument, UnitOfWork};

/// Student report filters; present filters are ANDed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct StudentReportFilter {
    pub course_id: Option<i32>,
    pub department_id: Option<i32>,
    pub academic_year_id: Option<i32>,
    pub status: Option<StudentStatus>,
}

impl From<StudentReportFilter> for StudentFilter {
    fn from(filter: StudentReportFilter) -> Self {
        StudentFilter {
            course_id: filter.course_id,
            department_id: filter.department_id,
            academic_year_id: filter.academic_year_id,
            status: filter.status,
            year_level: None,
            scope: Scope::Live,
        }
    }
}

/// Faculty report filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct FacultyReportFilter {
    pub department_id: Option<i32>,
}

/// Human readable names of the applied student filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StudentReportLabels {
    pub course: String,
    pub department: String,
    pub academic_year: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StudentReportRow {
    pub student_number: String,
    pub name: String,
    pub course: Option<String>,
    pub department: Option<String>,
    pub year_level: i32,
    pub status: StudentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StudentReport {
    pub labels: StudentReportLabels,
    pub rows: Vec<StudentReportRow>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FacultyReportRow {
    pub name: String,
    pub email: String,
    pub position: String,
    pub status: String,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FacultyReport {
    /// Department filter label
    pub department: String,
    pub rows: Vec<FacultyReportRow>,
    pub generated_at: DateTime<Utc>,
}

impl StudentReport {
    pub fn to_document(&self) -> ReportDocument {
        let labels = [
            ("Course", &self.labels.course),
            ("Department", &self.labels.department),
            ("Academic Year", &self.labels.academic_year),
            ("Status", &self.labels.status),
        ];

        ReportDocument {
            title: "Student Report".to_string(),
            labels: labels
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            columns: ["Student Number", "Name", "Course", "Department", "Year Level", "Status"]
                .map(String::from)
                .to_vec(),
            rows: self
                .rows
                .iter()
                .map(|row| {
                    vec![
                        row.student_number.clone(),
                        row.name.clone(),
                        row.course.clone().unwrap_or_default(),
                        row.department.clone().unwrap_or_default(),
                        row.year_level.to_string(),
                        row.status.to_string(),
                    ]
                })
                .collect(),
            generated_at: self.generated_at,
        }
    }
}

impl FacultyReport {
    pub fn to_document(&self) -> ReportDocument {
        ReportDocument {
            title: "Faculty Report".to_string(),
            labels: vec![("Department".to_string(), self.department.clone())],
            columns: ["Name", "Email", "Position", "Status", "Department"]
                .map(String::from)
                .to_vec(),
            rows: self
                .rows
                .iter()
                .map(|row| {
                    vec![
                        row.name.clone(),
                        row.email.clone(),
                        row.position.clone(),
                        row.status.clone(),
                        row.department.clone().unwrap_or_default(),
                    ]
                })
                .collect(),
            generated_at: self.generated_at,
        }
    }
}

#[async_trait]
pub trait ReportService: Send + Sync {
    async fn students(&self, filter: StudentReportFilter) -> AppResult<StudentReport>;

    async fn faculty(&self, filter: FacultyReportFilter) -> AppResult<FacultyReport>;

    async fn render_students(&self, filter: StudentReportFilter) -> AppResult<RenderedDocument>;

    async fn render_faculty(&self, filter: FacultyReportFilter) -> AppResult<RenderedDocument>;
}

pub struct ReportManager<U: UnitOfWork> {
    uow: Arc<U>,
    renderer: Arc<dyn DocumentRenderer>,
}

impl<U: UnitOfWork> ReportManager<U> {
    pub fn new(uow: Arc<U>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self { uow, renderer }
    }

    async fn course_label(&self, id: Option<i32>) -> AppResult<String> {
        let Some(id) = id else {
            return Ok(REPORT_LABEL_ALL.to_string());
        };
        let course = self.uow.courses().find_by_id(id, Scope::All).await?;
        course.map(|c| c.name).ok_or(AppError::NotFound)
    }

    async fn department_label(&self, id: Option<i32>) -> AppResult<String> {
        let Some(id) = id else {
            return Ok(REPORT_LABEL_ALL.to_string());
        };
        let department = self.uow.departments().find_by_id(id, Scope::All).await?;
        department.map(|d| d.name).ok_or(AppError::NotFound)
    }

    async fn academic_year_label(&self, id: Option<i32>) -> AppResult<String> {
        let Some(id) = id else {
            return Ok(REPORT_LABEL_ALL.to_string());
        };
        let year = self.uow.academic_years().find_by_id(id, Scope::All).await?;
        year.map(|y| y.school_year).ok_or(AppError::NotFound)
    }

    async fn department_names(&self) -> AppResult<HashMap<i32, String>> {
        let departments = self.uow.departments().list_all().await?;
        Ok(departments.into_iter().map(|d| (d.id, d.name)).collect())
    }

    async fn course_names(&self) -> AppResult<HashMap<i32, String>> {
        let courses = self.uow.courses().list_all().await?;
        Ok(courses.into_iter().map(|c| (c.id, c.name)).collect())
    }
}

fn student_row(
    student: StudentProfile,
    courses: &HashMap<i32, String>,
    departments: &HashMap<i32, String>,
) -> StudentReportRow {
    StudentReportRow {
        name: student.display_name(),
        course: student.course_id.and_then(|id| courses.get(&id).cloned()),
        department: student.department_id.and_then(|id| departments.get(&id).cloned()),
        student_number: student.student_number,
        year_level: student.year_level,
        status: student.status,
    }
}

fn faculty_row(faculty: FacultyProfile, departments: &HashMap<i32, String>) -> FacultyReportRow {
    FacultyReportRow {
        name: faculty.display_name(),
        department: faculty.department_id.and_then(|id| departments.get(&id).cloned()),
        email: faculty.email,
        position: faculty.position.to_string(),
        status: faculty.status.to_string(),
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ReportManager<U> {
    async fn students(&self, filter: StudentReportFilter) -> AppResult<StudentReport> {
        let (course, department, academic_year) = parallel::join3(
            self.course_label(filter.course_id),
            self.department_label(filter.department_id),
            self.academic_year_label(filter.academic_year_id),
        )
        .await?;
        let status = filter
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| REPORT_LABEL_ALL.to_string());

        let (students, courses, departments) = parallel::join3(
            self.uow.students().list_for_report(filter.into()),
            self.course_names(),
            self.department_names(),
        )
        .await?;

        let rows = students
            .into_iter()
            .map(|s| student_row(s, &courses, &departments))
            .collect::<Vec<_>>();
        tracing::debug!(rows = rows.len(), ?filter, "Student report assembled");

        Ok(StudentReport {
            labels: StudentReportLabels {
                course,
                department,
                academic_year,
                status,
            },
            rows,
            generated_at: Utc::now(),
        })
    }

    async fn faculty(&self, filter: FacultyReportFilter) -> AppResult<FacultyReport> {
        let department = self.department_label(filter.department_id).await?;

        let report_filter = FacultyFilter {
            department_id: filter.department_id,
            scope: Scope::Live,
            ..Default::default()
        };
        let (faculty, departments) = parallel::join2(
            self.uow.faculty().list_for_report(report_filter),
            self.department_names(),
        )
        .await?;

        Ok(FacultyReport {
            department,
            rows: faculty
                .into_iter()
                .map(|f| faculty_row(f, &departments))
                .collect(),
            generated_at: Utc::now(),
        })
    }

    async fn render_students(&self, filter: StudentReportFilter) -> AppResult<RenderedDocument> {
        let report = self.students(filter).await?;
        self.renderer.render(&report.to_document())
    }

    async fn render_faculty(&self, filter: FacultyReportFilter) -> AppResult<RenderedDocument> {
        let report = self.faculty(filter).await?;
        self.renderer.render(&report.to_document())
    }
}
