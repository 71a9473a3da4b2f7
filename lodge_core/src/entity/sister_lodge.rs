use crate::ids::SisterLodgeId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum LodgeRegion {
    #[sea_orm(string_value = "world")]
    World,
    #[sea_orm(string_value = "mexico")]
    Mexico,
    #[sea_orm(string_value = "yucatan")]
    Yucatan,
}

impl LodgeRegion {
    pub fn label(&self) -> &'static str {
        match self {
            LodgeRegion::World => "🌍 Logias del Mundo",
            LodgeRegion::Mexico => "🇲🇽 Logias de México",
            LodgeRegion::Yucatan => "🌴 Logias de Yucatán",
        }
    }
}

/// Another lodge listed in the directory of friendly lodges.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sister_lodge")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: SisterLodgeId,
    pub name: String,
    pub location: String,
    pub founded: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Flag emoji shown next to the name.
    pub flag: String,
    pub region: LodgeRegion,
    pub sort_order: i32,
    pub is_active: bool,
    pub featured: bool,
}

impl Model {
    pub fn founded_label(&self) -> String {
        self.founded
            .map(|year| year.to_string())
            .unwrap_or_else(|| "—".to_owned())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
