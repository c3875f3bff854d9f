//! Migration: Create the school records tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // department_head_id has no FK: departments and faculty reference each other
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Departments::DepartmentHeadId).integer().null())
                    .col(
                        ColumnDef::new(Departments::LockVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Departments::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Departments::UpdatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Departments::ArchivedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Courses::Status).string().not_null())
                    .col(ColumnDef::new(Courses::DepartmentId).integer().null())
                    .col(ColumnDef::new(Courses::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Courses::ArchivedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_courses_department")
                            .from(Courses::Table, Courses::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AcademicYears::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AcademicYears::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AcademicYears::SchoolYear)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AcademicYears::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(AcademicYears::UpdatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(AcademicYears::ArchivedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FacultyProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FacultyProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FacultyProfiles::FirstName).string().not_null())
                    .col(ColumnDef::new(FacultyProfiles::MiddleName).string().null())
                    .col(ColumnDef::new(FacultyProfiles::LastName).string().not_null())
                    .col(ColumnDef::new(FacultyProfiles::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(FacultyProfiles::Position).string().not_null())
                    .col(ColumnDef::new(FacultyProfiles::Status).string().not_null())
                    .col(ColumnDef::new(FacultyProfiles::DepartmentId).integer().null())
                    .col(ColumnDef::new(FacultyProfiles::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(FacultyProfiles::UpdatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(FacultyProfiles::ArchivedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_faculty_profiles_department")
                            .from(FacultyProfiles::Table, FacultyProfiles::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::StudentNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(StudentProfiles::FirstName).string().not_null())
                    .col(ColumnDef::new(StudentProfiles::MiddleName).string().null())
                    .col(ColumnDef::new(StudentProfiles::LastName).string().not_null())
                    .col(ColumnDef::new(StudentProfiles::Status).string().not_null())
                    .col(ColumnDef::new(StudentProfiles::DepartmentId).integer().null())
                    .col(ColumnDef::new(StudentProfiles::CourseId).integer().null())
                    .col(ColumnDef::new(StudentProfiles::AcademicYearId).integer().null())
                    .col(ColumnDef::new(StudentProfiles::YearLevel).integer().not_null())
                    .col(ColumnDef::new(StudentProfiles::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(StudentProfiles::UpdatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(StudentProfiles::ArchivedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_profiles_department")
                            .from(StudentProfiles::Table, StudentProfiles::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_profiles_course")
                            .from(StudentProfiles::Table, StudentProfiles::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_profiles_academic_year")
                            .from(StudentProfiles::Table, StudentProfiles::AcademicYearId)
                            .to(AcademicYears::Table, AcademicYears::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop dependents before the tables they reference
        manager
            .drop_table(Table::drop().table(StudentProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FacultyProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AcademicYears::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    Name,
    DepartmentHeadId,
    LockVersion,
    CreatedAt,
    UpdatedAt,
    ArchivedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    Status,
    DepartmentId,
    CreatedAt,
    UpdatedAt,
    ArchivedAt,
}

#[derive(Iden)]
enum AcademicYears {
    Table,
    Id,
    SchoolYear,
    CreatedAt,
    UpdatedAt,
    ArchivedAt,
}

#[derive(Iden)]
enum FacultyProfiles {
    Table,
    Id,
    FirstName,
    MiddleName,
    LastName,
    Email,
    Position,
    Status,
    DepartmentId,
    CreatedAt,
    UpdatedAt,
    ArchivedAt,
}

#[derive(Iden)]
enum StudentProfiles {
    Table,
    Id,
    StudentNumber,
    FirstName,
    MiddleName,
    LastName,
    Status,
    DepartmentId,
    CourseId,
    AcademicYearId,
    YearLevel,
    CreatedAt,
    UpdatedAt,
    ArchivedAt,
}
