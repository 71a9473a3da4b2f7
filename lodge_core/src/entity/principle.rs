use crate::ids::PrincipleId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    #[sea_orm(string_value = "north")]
    North,
    #[sea_orm(string_value = "south")]
    South,
    #[sea_orm(string_value = "central")]
    Central,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "principle")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: PrincipleId,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub symbol: String,
    pub pillar: Pillar,
    pub sort_order: i32,
    pub featured: bool,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
