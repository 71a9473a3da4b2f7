use crate::ids::PositionId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Hierarchy tier of a lodge office. Variants are declared from the most
/// senior down, which is the order officers are listed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum PositionTier {
    #[sea_orm(string_value = "worshipful_master")]
    WorshipfulMaster,
    #[sea_orm(string_value = "officer")]
    Officer,
    #[sea_orm(string_value = "committee")]
    Committee,
    #[sea_orm(string_value = "honorary")]
    Honorary,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "position")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: PositionId,
    pub name: String,
    pub abbreviation: String,
    pub tier: PositionTier,
    pub sort_order: i32,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::member::Entity")]
    Member,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
