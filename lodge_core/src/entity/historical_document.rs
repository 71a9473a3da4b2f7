use crate::ids::{HistoricalDocumentId, HistoricalEventId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "historical_document")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: HistoricalDocumentId,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub dated_on: Option<Date>,
    pub kind: String,
    pub historical_event_id: Option<HistoricalEventId>,
    pub is_active: bool,
    pub members_only: bool,
    pub downloadable: bool,
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
