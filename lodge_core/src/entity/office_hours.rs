use crate::ids::OfficeHoursId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::meeting::weekday_name;

/// Opening hours of the secretariat for one weekday.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "office_hours")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: OfficeHoursId,
    /// 0 is Monday.
    pub weekday: i32,
    pub opens_at: Time,
    pub closes_at: Time,
    pub closed: bool,
}

impl Model {
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.weekday).unwrap_or("Desconocido")
    }

    /// `Lunes: 09:00 - 14:00`, or `Domingo - Cerrado`.
    pub fn describe(&self) -> String {
        if self.closed {
            format!("{} - Cerrado", self.day_name())
        } else {
            format!(
                "{}: {} - {}",
                self.day_name(),
                self.opens_at.format("%H:%M"),
                self.closes_at.format("%H:%M")
            )
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
