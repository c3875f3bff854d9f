//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{
    academic_year_handler, course_handler, department_handler, faculty_handler, report_handler,
    student_handler, sync_handler,
};
use crate::domain::{
    AcademicYear, Course, CreateAcademicYear, CreateCourse, CreateDepartment, CreateFaculty,
    CreateStudent, Department, DestroySummary, FacultyPosition, FacultyProfile, Lifecycle,
    LifecycleOutcome, RecordStatus, Scope, StudentProfile, StudentStatus, UpdateAcademicYear,
    UpdateCourse, UpdateDepartment, UpdateFaculty, UpdateStudent,
};
use crate::services::{
    ExportSummary, FacultyReport, FacultyReportRow, ImportSummary, SheetEntity, StudentReport,
    StudentReportLabels, StudentReportRow,
};
use crate::types::PaginationMeta;

/// OpenAPI documentation for the School Records API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "School Records API",
        version = "0.1.0",
        description = "Departments, courses, academic years, students and faculty with cascading archival, reports and spreadsheet sync",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        department_handler::list_departments,
        department_handler::create_department,
        department_handler::get_department,
        department_handler::update_department,
        department_handler::archive_department,
        department_handler::restore_department,
        department_handler::destroy_department,
        course_handler::list_courses,
        course_handler::create_course,
        course_handler::get_course,
        course_handler::update_course,
        course_handler::archive_course,
        course_handler::restore_course,
        course_handler::destroy_course,
        academic_year_handler::list_academic_years,
        academic_year_handler::create_academic_year,
        academic_year_handler::get_academic_year,
        academic_year_handler::update_academic_year,
        academic_year_handler::archive_academic_year,
        academic_year_handler::restore_academic_year,
        academic_year_handler::destroy_academic_year,
        student_handler::list_students,
        student_handler::create_student,
        student_handler::get_student,
        student_handler::update_student,
        student_handler::archive_student,
        student_handler::restore_student,
        student_handler::destroy_student,
        faculty_handler::list_faculty_members,
        faculty_handler::create_faculty,
        faculty_handler::get_faculty,
        faculty_handler::update_faculty,
        faculty_handler::archive_faculty,
        faculty_handler::restore_faculty,
        faculty_handler::destroy_faculty,
        report_handler::student_report,
        report_handler::faculty_report,
        sync_handler::export_sheet,
        sync_handler::import_sheet,
    ),
    components(
        schemas(
            // Lifecycle and vocabularies
            Lifecycle,
            LifecycleOutcome,
            Scope,
            RecordStatus,
            StudentStatus,
            FacultyPosition,
            PaginationMeta,
            // Records
            Department,
            CreateDepartment,
            UpdateDepartment,
            DestroySummary,
            Course,
            CreateCourse,
            UpdateCourse,
            AcademicYear,
            CreateAcademicYear,
            UpdateAcademicYear,
            StudentProfile,
            CreateStudent,
            UpdateStudent,
            FacultyProfile,
            CreateFaculty,
            UpdateFaculty,
            // Reports
            StudentReport,
            StudentReportLabels,
            StudentReportRow,
            FacultyReport,
            FacultyReportRow,
            report_handler::ReportFormat,
            // Sync
            SheetEntity,
            ExportSummary,
            ImportSummary,
        )
    ),
    tags(
        (name = "Departments", description = "Departments and the archive cascade"),
        (name = "Courses", description = "Courses offered by departments"),
        (name = "Academic Years", description = "School years"),
        (name = "Students", description = "Student profiles"),
        (name = "Faculty", description = "Faculty profiles and department heads"),
        (name = "Reports", description = "Filtered student and faculty reports"),
        (name = "Sync", description = "Spreadsheet export and import")
    )
)]
pub struct ApiDoc;
