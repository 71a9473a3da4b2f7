use crate::ids::{CourseId, MemberId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Degree a course or meeting is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    #[sea_orm(string_value = "apprentice")]
    Apprentice,
    #[sea_orm(string_value = "fellow")]
    Fellow,
    #[sea_orm(string_value = "master")]
    Master,
    #[sea_orm(string_value = "all")]
    All,
}

impl Audience {
    pub fn label(&self) -> &'static str {
        match self {
            Audience::Apprentice => "Aprendiz",
            Audience::Fellow => "Compañero",
            Audience::Master => "Maestro",
            Audience::All => "Todos los grados",
        }
    }

    /// Symbol shown next to the audience in listings.
    pub fn symbol(&self) -> &'static str {
        match self {
            Audience::Apprentice => "∴",
            Audience::Fellow => "⌖",
            Audience::Master => "◈",
            Audience::All => "⚜️",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: CourseId,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub audience: Audience,
    pub instructor_id: Option<MemberId>,
    pub starts_on: Option<Date>,
    pub ends_on: Option<Date>,
    pub lessons: i32,
    pub duration_hours: i32,
    pub lms_url: Option<String>,
    pub is_active: bool,
    pub members_only: bool,
    pub featured: bool,
    pub sort_order: i32,
    /// Maximum number of enrolled members, 0 for unlimited.
    pub capacity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::InstructorId",
        to = "super::member::Column::Id",
        on_delete = "SetNull"
    )]
    Instructor,
    #[sea_orm(has_many = "super::material::Entity")]
    Material,
    #[sea_orm(has_many = "super::course_enrollment::Entity")]
    Enrollment,
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl Related<super::course_enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
