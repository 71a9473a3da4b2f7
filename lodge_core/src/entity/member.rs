use crate::ids::{MemberId, PositionId, RankId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "honorary")]
    Honorary,
    #[sea_orm(string_value = "absent")]
    Absent,
    #[sea_orm(string_value = "retired")]
    Retired,
    #[sea_orm(string_value = "deceased")]
    Deceased,
}

impl MemberStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MemberStatus::Active => "Activo",
            MemberStatus::Inactive => "Pasivo",
            MemberStatus::Honorary => "Honorario",
            MemberStatus::Absent => "Ausente",
            MemberStatus::Retired => "Retirado",
            MemberStatus::Deceased => "Fallecido",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: MemberId,
    pub full_name: String,
    /// Symbolic name used inside the lodge.
    pub lodge_name: Option<String>,
    pub status: MemberStatus,
    pub rank_id: RankId,
    pub position_id: Option<PositionId>,
    pub position_started_on: Option<Date>,
    pub position_ends_on: Option<Date>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub joined_on: Date,
    pub is_public: bool,
    pub sort_order: i32,
}

impl Model {
    /// Whether the member holds their office on `today`.
    pub fn holds_position_on(&self, today: Date) -> bool {
        if self.position_id.is_none() {
            return false;
        }
        let started = self.position_started_on.is_some_and(|start| start <= today);
        let not_ended = self.position_ends_on.is_none_or(|end| end >= today);
        started && not_ended
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rank::Entity",
        from = "Column::RankId",
        to = "super::rank::Column::Id",
        on_delete = "Restrict"
    )]
    Rank,
    #[sea_orm(
        belongs_to = "super::position::Entity",
        from = "Column::PositionId",
        to = "super::position::Column::Id",
        on_delete = "SetNull"
    )]
    Position,
}

impl Related<super::rank::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rank.def()
    }
}

impl Related<super::position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Position.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
