use super::course::Audience;
use crate::ids::MeetingId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

const WEEKDAYS: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

/// Recurring weekly meeting of the lodge.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meeting")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: MeetingId,
    /// 0 is Monday.
    pub weekday: i32,
    pub time: Time,
    pub audience: Audience,
    pub venue: String,
    pub address: String,
    pub is_active: bool,
}

/// Spanish name of a weekday counted from Monday as 0.
pub fn weekday_name(weekday: i32) -> Option<&'static str> {
    usize::try_from(weekday)
        .ok()
        .and_then(|day| WEEKDAYS.get(day))
        .copied()
}

impl Model {
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday).unwrap_or("Lunes")
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
