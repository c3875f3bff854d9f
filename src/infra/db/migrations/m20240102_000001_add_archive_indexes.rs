//! Migration: Index archive timestamps and the cascade lookup columns.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (index name, table, column)
const INDEXES: &[(&str, &str, &str)] = &[
    ("idx_departments_archived_at", "departments", "archived_at"),
    ("idx_courses_archived_at", "courses", "archived_at"),
    ("idx_courses_department_id", "courses", "department_id"),
    ("idx_academic_years_archived_at", "academic_years", "archived_at"),
    ("idx_faculty_profiles_archived_at", "faculty_profiles", "archived_at"),
    ("idx_faculty_profiles_department_id", "faculty_profiles", "department_id"),
    ("idx_student_profiles_archived_at", "student_profiles", "archived_at"),
    ("idx_student_profiles_department_id", "student_profiles", "department_id"),
    ("idx_student_profiles_course_id", "student_profiles", "course_id"),
    ("idx_student_profiles_last_name", "student_profiles", "last_name"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(*name)
                        .table(Alias::new(*table))
                        .col(Alias::new(*column))
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in INDEXES.iter().rev() {
            manager
                .drop_index(
                    Index::drop()
                        .name(*name)
                        .table(Alias::new(*table))
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}
