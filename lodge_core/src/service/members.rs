use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::Condition;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
    entity::prelude::*,
    ids::{MemberId, PositionId, RankId},
    pagination::{paginate, Paged},
    service::contact::looks_like_email,
};

pub const DIRECTORY_PAGE_SIZE: u64 = 12;

#[derive(Debug, Error)]
pub enum MembersServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("member not found")]
    NotFound,

    #[error("invalid profile: {0}")]
    Validation(String),
}

/// A member together with the reference rows a listing shows next to them.
#[derive(Debug, Clone, Serialize)]
pub struct MemberCard {
    pub member: MemberModel,
    pub rank: Option<RankModel>,
    pub position: Option<PositionModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Directory {
    pub members: Paged<MemberCard>,
    pub officers: Vec<MemberCard>,
}

/// Fields a member may change on their own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub lodge_name: Option<String>,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_public: bool,
}

impl ProfileUpdate {
    pub fn from_member(member: &MemberModel) -> Self {
        ProfileUpdate {
            lodge_name: member.lodge_name.clone(),
            full_name: member.full_name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            address: member.address.clone(),
            is_public: member.is_public,
        }
    }

    fn validate(&self) -> Result<(), MembersServiceError> {
        if self.full_name.trim().is_empty() {
            return Err(MembersServiceError::Validation(
                "El nombre completo es obligatorio".to_owned(),
            ));
        }
        if let Some(email) = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            if !looks_like_email(email) {
                return Err(MembersServiceError::Validation(
                    "Introduce un correo electrónico válido".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[derive(Clone)]
pub struct MembersService {
    db: DatabaseConnection,
}

impl MembersService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn public_members() -> Select<Member> {
        Member::find()
            .filter(MemberColumn::IsPublic.eq(true))
            .filter(MemberColumn::Status.eq(MemberStatus::Active))
    }

    async fn cards(&self, members: Vec<MemberModel>) -> Result<Vec<MemberCard>, DbErr> {
        let ranks: HashMap<RankId, RankModel> = Rank::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|rank| (rank.id, rank))
            .collect();
        let positions: HashMap<PositionId, PositionModel> = Position::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|position| (position.id, position))
            .collect();

        Ok(members
            .into_iter()
            .map(|member| MemberCard {
                rank: ranks.get(&member.rank_id).cloned(),
                position: member
                    .position_id
                    .and_then(|id| positions.get(&id).cloned()),
                member,
            })
            .collect())
    }

    pub async fn directory(
        &self,
        page: Option<u64>,
        today: NaiveDate,
    ) -> Result<Directory, MembersServiceError> {
        let listing = Self::public_members()
            .order_by_asc(MemberColumn::SortOrder)
            .order_by_asc(MemberColumn::FullName);
        let paged = paginate(&self.db, listing, DIRECTORY_PAGE_SIZE, page).await?;

        let members = Paged {
            items: self.cards(paged.items).await?,
            number: paged.number,
            num_pages: paged.num_pages,
            total: paged.total,
        };

        Ok(Directory {
            members,
            officers: self.officers(today).await?,
        })
    }

    /// Active members whose term covers `today`, by tier then position order.
    pub async fn officers(&self, today: NaiveDate) -> Result<Vec<MemberCard>, MembersServiceError> {
        let holders = Member::find()
            .filter(MemberColumn::Status.eq(MemberStatus::Active))
            .filter(MemberColumn::PositionId.is_not_null())
            .filter(MemberColumn::PositionStartedOn.lte(today))
            .filter(
                Condition::any()
                    .add(MemberColumn::PositionEndsOn.is_null())
                    .add(MemberColumn::PositionEndsOn.gte(today)),
            )
            .all(&self.db)
            .await?;

        let mut officers: Vec<MemberCard> = self
            .cards(holders)
            .await?
            .into_iter()
            .filter(|card| card.position.is_some())
            .collect();

        officers.sort_by_key(|card| {
            card.position
                .as_ref()
                .map(|position| (position.tier, position.sort_order))
        });

        Ok(officers)
    }

    pub async fn public_member(&self, id: MemberId) -> Result<MemberCard, MembersServiceError> {
        let member = Self::public_members()
            .filter(MemberColumn::Id.eq(id))
            .one(&self.db)
            .await?
            .ok_or(MembersServiceError::NotFound)?;

        self.cards(vec![member])
            .await?
            .pop()
            .ok_or(MembersServiceError::NotFound)
    }

    pub async fn member(&self, id: MemberId) -> Result<MemberModel, MembersServiceError> {
        Member::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(MembersServiceError::NotFound)
    }

    pub async fn update_profile(
        &self,
        id: MemberId,
        update: ProfileUpdate,
    ) -> Result<MemberModel, MembersServiceError> {
        update.validate()?;

        let member = self.member(id).await?;
        let mut active: MemberActiveModel = member.into();
        active.lodge_name = Set(trimmed(update.lodge_name));
        active.full_name = Set(update.full_name.trim().to_owned());
        active.email = Set(trimmed(update.email));
        active.phone = Set(trimmed(update.phone));
        active.address = Set(trimmed(update.address));
        active.is_public = Set(update.is_public);

        let updated = active.update(&self.db).await?;
        info!(member = %updated.id, "profile updated");
        Ok(updated)
    }
}
