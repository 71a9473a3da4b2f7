use crate::ids::RankId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rank")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: RankId,
    /// Ordinal of the degree, 1 for the first.
    #[sea_orm(unique)]
    pub number: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub symbol: String,
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
