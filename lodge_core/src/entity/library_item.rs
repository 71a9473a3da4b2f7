use crate::ids::LibraryItemId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "library_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: LibraryItemId,
    pub title: String,
    pub author: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    pub published_year: Option<i32>,
    pub publisher: Option<String>,
    pub external_url: Option<String>,
    /// Doubles as the active flag for visibility.
    pub is_available: bool,
    pub members_only: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
