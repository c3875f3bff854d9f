//! Faculty profile database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::FacultyProfile;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "faculty_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub position: String,
    pub status: String,
    pub department_id: Option<i32>,
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
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FacultyProfile {
    fn from(model: Model) -> Self {
        FacultyProfile {
            id: model.id,
            first_name: model.first_name,
            middle_name: model.middle_name,
            last_name: model.last_name,
            email: model.email,
            position: model.position.parse().unwrap_or_default(),
            status: model.status.parse().unwrap_or_default(),
            department_id: model.department_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lifecycle: model.archived_at.into(),
        }
    }
}
