use crate::ids::{PageId, SectionId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "text_image")]
    TextImage,
    #[sea_orm(string_value = "gallery")]
    Gallery,
    #[sea_orm(string_value = "cards")]
    Cards,
    #[sea_orm(string_value = "timeline")]
    Timeline,
    #[sea_orm(string_value = "quotes")]
    Quotes,
    #[sea_orm(string_value = "form")]
    Form,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "section")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: SectionId,
    pub page_id: PageId,
    pub title: String,
    pub subtitle: Option<String>,
    pub kind: SectionKind,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub sort_order: i32,
    pub dark_background: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::PageId",
        to = "super::page::Column::Id",
        on_delete = "Cascade"
    )]
    Page,
}

impl Related<super::page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Page.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
