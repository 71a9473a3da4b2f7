use crate::ids::{EventId, MemberId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[sea_orm(string_value = "regular_meeting")]
    RegularMeeting,
    #[sea_orm(string_value = "extraordinary_meeting")]
    ExtraordinaryMeeting,
    #[sea_orm(string_value = "degree_ceremony")]
    DegreeCeremony,
    #[sea_orm(string_value = "lecture")]
    Lecture,
    #[sea_orm(string_value = "workshop")]
    Workshop,
    #[sea_orm(string_value = "social")]
    Social,
    #[sea_orm(string_value = "philanthropic")]
    Philanthropic,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::RegularMeeting => "Tenida Regular",
            EventKind::ExtraordinaryMeeting => "Tenida Extraordinaria",
            EventKind::DegreeCeremony => "Ceremonia de Grado",
            EventKind::Lecture => "Conferencia",
            EventKind::Workshop => "Taller",
            EventKind::Social => "Evento Social",
            EventKind::Philanthropic => "Actividad Filantrópica",
        }
    }

    /// Stored name, also used as the css class suffix in calendar feeds.
    pub fn code(&self) -> String {
        self.to_value()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: EventId,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub kind: EventKind,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub starts_at: DateTimeUtc,
    pub ends_at: Option<DateTimeUtc>,
    pub venue: String,
    pub address: Option<String>,
    pub organizer_id: Option<MemberId>,
    /// Maximum number of attendees, 0 for unlimited.
    pub capacity: i32,
    pub is_active: bool,
    pub members_only: bool,
    pub featured: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::OrganizerId",
        to = "super::member::Column::Id",
        on_delete = "SetNull"
    )]
    Organizer,
    #[sea_orm(has_many = "super::event_attendance::Entity")]
    Attendance,
}

impl Related<super::event_attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
