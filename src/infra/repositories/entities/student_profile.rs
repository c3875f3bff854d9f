//! Student profile database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::StudentProfile;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "student_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub student_number: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub status: String,
    pub department_id: Option<i32>,
    pub course_id: Option<i32>,
    pub academic_year_id: Option<i32>,
    pub year_level: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub archived_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "SetNull"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::academic_year::Entity",
        from = "Column::AcademicYearId",
        to = "super::academic_year::Column::Id",
        on_delete = "SetNull"
    )]
    AcademicYear,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::academic_year::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AcademicYear.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StudentProfile {
    fn from(model: Model) -> Self {
        StudentProfile {
            id: model.id,
            student_number: model.student_number,
            first_name: model.first_name,
            middle_name: model.middle_name,
            last_name: model.last_name,
            status: model.status.parse().unwrap_or_default(),
            department_id: model.department_id,
            course_id: model.course_id,
            academic_year_id: model.academic_year_id,
            year_level: model.year_level,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lifecycle: model.archived_at.into(),
        }
    }
}
