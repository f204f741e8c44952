use chrono::NaiveDateTime;
use entity::membership::MembershipType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Wire representation of [`MembershipType`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipTypeDto {
    Monthly,
    Annual,
}

impl From<MembershipTypeDto> for MembershipType {
    fn from(membership_type: MembershipTypeDto) -> Self {
        match membership_type {
            MembershipTypeDto::Monthly => MembershipType::Monthly,
            MembershipTypeDto::Annual => MembershipType::Annual,
        }
    }
}

impl From<MembershipType> for MembershipTypeDto {
    fn from(membership_type: MembershipType) -> Self {
        match membership_type {
            MembershipType::Monthly => MembershipTypeDto::Monthly,
            MembershipType::Annual => MembershipTypeDto::Annual,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct MembershipDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub membership_type: MembershipTypeDto,
    pub price: Decimal,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl From<entity::membership::Model> for MembershipDto {
    fn from(membership: entity::membership::Model) -> Self {
        Self {
            id: membership.id,
            user_id: membership.user_id,
            membership_type: membership.membership_type.into(),
            price: membership.price,
            start_date: membership.start_date,
            end_date: membership.end_date,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CreateMembershipDto {
    pub membership_type: MembershipTypeDto,
}
