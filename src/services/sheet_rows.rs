//! Flat row layouts for spreadsheet sync.
//!
//! Every sheet starts with the record id and ends with `archived_at`.
//! Imports also accept rows without the trailing `archived_at` cell.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::config::{
    SHEET_ACADEMIC_YEARS, SHEET_COURSES, SHEET_DEPARTMENTS, SHEET_FACULTY, SHEET_STUDENTS,
};
use crate::domain::{
    AcademicYear, Course, CreateAcademicYear, CreateCourse, CreateFaculty, CreateStudent,
    Department, FacultyProfile, StudentProfile,
};
use crate::errors::AppError;

/// Record kinds that can be synced with a spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SheetEntity {
    Departments,
    Courses,
    AcademicYears,
    Students,
    Faculty,
}

impl SheetEntity {
    pub const ALL: [SheetEntity; 5] = [
        SheetEntity::Departments,
        SheetEntity::Courses,
        SheetEntity::AcademicYears,
        SheetEntity::Students,
        SheetEntity::Faculty,
    ];

    /// Name of the backing sheet
    pub fn sheet(&self) -> &'static str {
        match self {
            SheetEntity::Departments => SHEET_DEPARTMENTS,
            SheetEntity::Courses => SHEET_COURSES,
            SheetEntity::AcademicYears => SHEET_ACADEMIC_YEARS,
            SheetEntity::Students => SHEET_STUDENTS,
            SheetEntity::Faculty => SHEET_FACULTY,
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            SheetEntity::Departments => DEPARTMENT_COLUMNS,
            SheetEntity::Courses => COURSE_COLUMNS,
            SheetEntity::AcademicYears => ACADEMIC_YEAR_COLUMNS,
            SheetEntity::Students => STUDENT_COLUMNS,
            SheetEntity::Faculty => FACULTY_COLUMNS,
        }
    }

    pub fn header(&self) -> Vec<String> {
        self.columns().iter().map(|c| c.to_string()).collect()
    }
}

impl FromStr for SheetEntity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "departments" => Ok(SheetEntity::Departments),
            "courses" => Ok(SheetEntity::Courses),
            "academic-years" | "academic_years" => Ok(SheetEntity::AcademicYears),
            "students" => Ok(SheetEntity::Students),
            "faculty" => Ok(SheetEntity::Faculty),
            other => Err(AppError::BadRequest(format!(
                "Unknown sheet '{}'. Must be one of departments, courses, academic-years, students, faculty",
                other
            ))),
        }
    }
}

impl fmt::Display for SheetEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet())
    }
}

const DEPARTMENT_COLUMNS: &[&str] = &["id", "name", "department_head_id", "archived_at"];
const COURSE_COLUMNS: &[&str] = &["id", "name", "status", "department_id", "archived_at"];
const ACADEMIC_YEAR_COLUMNS: &[&str] = &["id", "school_year", "archived_at"];
const STUDENT_COLUMNS: &[&str] = &[
    "id",
    "student_number",
    "first_name",
    "middle_name",
    "last_name",
    "status",
    "department_id",
    "course_id",
    "academic_year_id",
    "year_level",
    "archived_at",
];
const FACULTY_COLUMNS: &[&str] = &[
    "id",
    "first_name",
    "middle_name",
    "last_name",
    "email",
    "position",
    "status",
    "department_id",
    "archived_at",
];

/// A parsed import row: the id cell plus the record fields.
#[derive(Debug, Clone)]
pub struct SheetRow<T> {
    /// 0-based position among the data rows
    pub index: usize,
    pub id: Option<i32>,
    pub record: T,
}

impl<T> SheetRow<T> {
    /// Spreadsheet row number as a user sees it (header is row 1)
    pub fn line(&self) -> usize {
        self.index + 2
    }
}

/// Department fields carried by a sheet row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRecord {
    pub name: String,
    pub department_head_id: Option<i32>,
}

fn id_cell(id: Option<i32>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

fn archived_cell(archived_at: Option<DateTime<Utc>>) -> String {
    archived_at
        .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

pub fn department_row(dept: &Department) -> Vec<String> {
    vec![
        dept.id.to_string(),
        dept.name.clone(),
        id_cell(dept.department_head_id),
        archived_cell(dept.lifecycle.archived_at()),
    ]
}

pub fn course_row(course: &Course) -> Vec<String> {
    vec![
        course.id.to_string(),
        course.name.clone(),
        course.status.to_string(),
        id_cell(course.department_id),
        archived_cell(course.lifecycle.archived_at()),
    ]
}

pub fn academic_year_row(year: &AcademicYear) -> Vec<String> {
    vec![
        year.id.to_string(),
        year.school_year.clone(),
        archived_cell(year.lifecycle.archived_at()),
    ]
}

pub fn student_row(student: &StudentProfile) -> Vec<String> {
    vec![
        student.id.to_string(),
        student.student_number.clone(),
        student.first_name.clone(),
        student.middle_name.clone().unwrap_or_default(),
        student.last_name.clone(),
        student.status.to_string(),
        id_cell(student.department_id),
        id_cell(student.course_id),
        id_cell(student.academic_year_id),
        student.year_level.to_string(),
        archived_cell(student.lifecycle.archived_at()),
    ]
}

pub fn faculty_row(faculty: &FacultyProfile) -> Vec<String> {
    vec![
        faculty.id.to_string(),
        faculty.first_name.clone(),
        faculty.middle_name.clone().unwrap_or_default(),
        faculty.last_name.clone(),
        faculty.email.clone(),
        faculty.position.to_string(),
        faculty.status.to_string(),
        id_cell(faculty.department_id),
        archived_cell(faculty.lifecycle.archived_at()),
    ]
}

/// Positional access to the cells of one row
struct Cells<'r> {
    cells: &'r [String],
    columns: &'static [&'static str],
}

impl<'r> Cells<'r> {
    fn new(cells: &'r [String], columns: &'static [&'static str]) -> Result<Self, String> {
        let full = columns.len();
        if cells.len() != full && cells.len() != full - 1 {
            return Err(format!(
                "expected {} columns, found {}",
                full,
                cells.len()
            ));
        }
        Ok(Self { cells, columns })
    }

    fn raw(&self, idx: usize) -> &str {
        self.cells.get(idx).map(|c| c.trim()).unwrap_or("")
    }

    fn text(&self, idx: usize) -> String {
        self.raw(idx).to_string()
    }

    fn optional_text(&self, idx: usize) -> Option<String> {
        Some(self.raw(idx)).filter(|c| !c.is_empty()).map(str::to_string)
    }

    fn optional_id(&self, idx: usize) -> Result<Option<i32>, String> {
        match self.raw(idx) {
            "" => Ok(None),
            cell => cell
                .parse()
                .map(Some)
                .map_err(|_| format!("{} '{}' is not a number", self.columns[idx], cell)),
        }
    }

    fn number(&self, idx: usize) -> Result<i32, String> {
        self.optional_id(idx)?
            .ok_or_else(|| format!("{} is required", self.columns[idx]))
    }

    /// Parse a vocabulary cell; empty cells take the default
    fn vocabulary<T>(&self, idx: usize) -> Result<T, String>
    where
        T: FromStr<Err = AppError> + Default,
    {
        match self.raw(idx) {
            "" => Ok(T::default()),
            cell => cell.parse().map_err(|e: AppError| e.to_string()),
        }
    }
}

fn parse_with<T>(
    index: usize,
    cells: &[String],
    columns: &'static [&'static str],
    build: impl FnOnce(&Cells<'_>) -> Result<T, String>,
) -> Result<SheetRow<T>, AppError> {
    let at_row = |msg: String| AppError::validation(format!("Row {}: {}", index + 2, msg));

    let cells = Cells::new(cells, columns).map_err(at_row)?;
    let id = cells.optional_id(0).map_err(at_row)?;
    let record = build(&cells).map_err(at_row)?;

    Ok(SheetRow { index, id, record })
}

pub fn parse_department(index: usize, cells: &[String]) -> Result<SheetRow<DepartmentRecord>, AppError> {
    parse_with(index, cells, DEPARTMENT_COLUMNS, |c| {
        Ok(DepartmentRecord {
            name: c.text(1),
            department_head_id: c.optional_id(2)?,
        })
    })
}

pub fn parse_course(index: usize, cells: &[String]) -> Result<SheetRow<CreateCourse>, AppError> {
    parse_with(index, cells, COURSE_COLUMNS, |c| {
        Ok(CreateCourse {
            name: c.text(1),
            status: c.vocabulary(2)?,
            department_id: c.optional_id(3)?,
        })
    })
}

pub fn parse_academic_year(
    index: usize,
    cells: &[String],
) -> Result<SheetRow<CreateAcademicYear>, AppError> {
    parse_with(index, cells, ACADEMIC_YEAR_COLUMNS, |c| {
        Ok(CreateAcademicYear {
            school_year: c.text(1),
        })
    })
}

pub fn parse_student(index: usize, cells: &[String]) -> Result<SheetRow<CreateStudent>, AppError> {
    parse_with(index, cells, STUDENT_COLUMNS, |c| {
        Ok(CreateStudent {
            student_number: c.text(1),
            first_name: c.text(2),
            middle_name: c.optional_text(3),
            last_name: c.text(4),
            status: c.vocabulary(5)?,
            department_id: c.optional_id(6)?,
            course_id: c.optional_id(7)?,
            academic_year_id: c.optional_id(8)?,
            year_level: c.number(9)?,
        })
    })
}

pub fn parse_faculty(index: usize, cells: &[String]) -> Result<SheetRow<CreateFaculty>, AppError> {
    parse_with(index, cells, FACULTY_COLUMNS, |c| {
        Ok(CreateFaculty {
            first_name: c.text(1),
            middle_name: c.optional_text(2),
            last_name: c.text(3),
            email: c.text(4),
            position: c.vocabulary(5)?,
            status: c.vocabulary(6)?,
            department_id: c.optional_id(7)?,
        })
    })
}
