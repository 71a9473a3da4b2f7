use crate::ids::PublicationId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "publication")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: PublicationId,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub subtitle: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub author_name: Option<String>,
    pub published_at: DateTimeUtc,
    /// Comma separated.
    pub tags: String,
    pub is_active: bool,
    pub featured: bool,
    pub important: bool,
    pub members_only: bool,
    pub visits: i64,
}

impl Model {
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::publication_category_link::Entity")]
    CategoryLink,
}

impl Related<super::publication_category_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CategoryLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
