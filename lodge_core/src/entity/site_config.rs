use crate::ids::SiteConfigId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Value stored in `slot` for the one allowed row.
pub const SINGLETON_SLOT: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: SiteConfigId,
    #[sea_orm(unique)]
    pub slot: i32,
    pub site_name: String,
    pub motto: String,
    pub logo_symbol: String,
    pub logo_text: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub lms_url: Option<String>,
    pub lms_login_url: Option<String>,
    pub lms_button_text: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub meta_description: String,
    pub meta_keywords: String,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub copyright_text: String,
    pub founding_year: i32,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
