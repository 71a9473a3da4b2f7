use crate::ids::StatisticId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum StatisticCategory {
    #[sea_orm(string_value = "general")]
    General,
    #[sea_orm(string_value = "members")]
    Members,
    #[sea_orm(string_value = "education")]
    Education,
    #[sea_orm(string_value = "events")]
    Events,
    #[sea_orm(string_value = "history")]
    History,
    #[sea_orm(string_value = "custom")]
    Custom,
}

/// A number shown on the dashboard. Automatic statistics ignore
/// `raw_value` and are computed from live data on every read.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "statistic")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: StatisticId,
    pub title: String,
    pub raw_value: String,
    pub subtitle: Option<String>,
    pub icon: Option<String>,
    pub category: StatisticCategory,
    pub is_automatic: bool,
    /// Wire name of the aggregation, parsed into `AutomaticKind` when read.
    pub automatic_kind: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub featured: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
