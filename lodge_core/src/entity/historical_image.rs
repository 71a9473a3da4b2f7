use crate::ids::{HistoricalEventId, HistoricalImageId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ImageCategory {
    #[sea_orm(string_value = "founding")]
    Founding,
    #[sea_orm(string_value = "events")]
    Events,
    #[sea_orm(string_value = "temple")]
    Temple,
    #[sea_orm(string_value = "members")]
    Members,
    #[sea_orm(string_value = "rituals")]
    Rituals,
    #[sea_orm(string_value = "documents")]
    Documents,
}

impl ImageCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ImageCategory::Founding => "Fundación",
            ImageCategory::Events => "Eventos",
            ImageCategory::Temple => "Templo",
            ImageCategory::Members => "Miembros",
            ImageCategory::Rituals => "Rituales",
            ImageCategory::Documents => "Documentos",
        }
    }
}

/// Picture in the history gallery. `image_path` is relative to the media
/// host.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "historical_image")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: HistoricalImageId,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_path: String,
    pub taken_on: Option<Date>,
    pub category: ImageCategory,
    pub historical_event_id: Option<HistoricalEventId>,
    pub featured: bool,
    pub sort_order: i32,
    pub uploaded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::historical_event::Entity",
        from = "Column::HistoricalEventId",
        to = "super::historical_event::Column::Id",
        on_delete = "SetNull"
    )]
    HistoricalEvent,
}

impl Related<super::historical_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HistoricalEvent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
