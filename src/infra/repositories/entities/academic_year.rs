//! Academic year database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::AcademicYear;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "academic_years")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub school_year: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub archived_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_profile::Entity")]
    StudentProfiles,
}

impl Related<super::student_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentProfiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AcademicYear {
    fn from(model: Model) -> Self {
        AcademicYear {
            id: model.id,
            school_year: model.school_year,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lifecycle: model.archived_at.into(),
        }
    }
}
