use crate::ids::ContactChannelId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    #[sea_orm(string_value = "email")]
    Email,
    #[sea_orm(string_value = "phone")]
    Phone,
    #[sea_orm(string_value = "whatsapp")]
    Whatsapp,
    #[sea_orm(string_value = "address")]
    Address,
    #[sea_orm(string_value = "hours")]
    Hours,
    #[sea_orm(string_value = "social")]
    Social,
    #[sea_orm(string_value = "other")]
    Other,
}

impl ChannelKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChannelKind::Email => "Correo electrónico",
            ChannelKind::Phone => "Teléfono",
            ChannelKind::Whatsapp => "WhatsApp",
            ChannelKind::Address => "Dirección física",
            ChannelKind::Hours => "Horario",
            ChannelKind::Social => "Red social",
            ChannelKind::Other => "Otro",
        }
    }
}

/// A way to reach the lodge, listed on the contact page.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_channel")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: ContactChannelId,
    pub kind: ChannelKind,
    pub title: String,
    pub value: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub is_primary: bool,
}

impl Model {
    /// Link target for channels that have one.
    pub fn href(&self) -> Option<String> {
        let digits: String = self.value.chars().filter(char::is_ascii_digit).collect();
        match self.kind {
            ChannelKind::Email => Some(format!("mailto:{}", self.value.trim())),
            ChannelKind::Phone if !digits.is_empty() => Some(format!("tel:+{digits}")),
            ChannelKind::Whatsapp if !digits.is_empty() => Some(format!("https://wa.me/{digits}")),
            ChannelKind::Social => Some(self.value.trim().to_owned()),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
