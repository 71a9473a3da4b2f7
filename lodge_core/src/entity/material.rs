use crate::ids::{CourseId, MaterialId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: MaterialId,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Free-form kind such as "pdf", "video" or "audio".
    pub kind: String,
    pub course_id: Option<CourseId>,
    pub external_url: Option<String>,
    pub author: Option<String>,
    pub published_on: Option<Date>,
    pub is_active: bool,
    pub members_only: bool,
    pub downloadable: bool,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
