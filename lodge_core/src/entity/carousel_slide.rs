use crate::ids::CarouselSlideId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "carousel_slide")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: CarouselSlideId,
    pub title: String,
    pub subtitle: Option<String>,
    pub link: Option<String>,
    pub button_text: String,
    pub sort_order: i32,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
