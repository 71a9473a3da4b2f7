use crate::ids::{MenuItemId, PageId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// A route of the site itself, `target` holds the path.
    #[sea_orm(string_value = "named")]
    Named,
    #[sea_orm(string_value = "external")]
    External,
    /// Points at a [`super::page`] through `page_id`.
    #[sea_orm(string_value = "page")]
    Page,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: MenuItemId,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub link_kind: LinkKind,
    pub target: String,
    pub page_id: Option<PageId>,
    pub parent_id: Option<MenuItemId>,
    pub sort_order: i32,
    pub icon: Option<String>,
    pub is_active: bool,
    pub members_only: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "Cascade"
    )]
    Parent,
    #[sea_orm(
        belongs_to = "super::page::Entity",
        from = "Column::PageId",
        to = "super::page::Column::Id",
        on_delete = "SetNull"
    )]
    Page,
}

impl Related<super::page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Page.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
