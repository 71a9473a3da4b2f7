use crate::ids::CategoryId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "publication_category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: CategoryId,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: String,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::publication_category_link::Entity")]
    PublicationLink,
}

impl Related<super::publication_category_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PublicationLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
