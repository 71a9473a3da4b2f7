use crate::ids::HistoricalEventId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "historical_event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: HistoricalEventId,
    pub title: String,
    pub occurred_on: Date,
    /// Free text shown instead of the exact date when set, e.g. "Primavera de 1980".
    pub date_label: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub video_url: Option<String>,
    pub sort_order: i32,
    pub is_milestone: bool,
    pub category: String,
}

impl Model {
    pub fn decade(&self) -> i32 {
        use chrono::Datelike;
        self.occurred_on.year().div_euclid(10) * 10
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::historical_document::Entity")]
    Document,
}

impl Related<super::historical_document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
