use chrono::{NaiveDateTime, Utc};
use entity::membership::MembershipType;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

pub struct MembershipRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MembershipRepository<'a, C> {
    /// Creates a new instance of [`MembershipRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        membership_type: MembershipType,
        price: Decimal,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Result<entity::membership::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let membership = entity::membership::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            membership_type: Set(membership_type),
            price: Set(price),
            start_date: Set(start_date),
            end_date: Set(end_date),
            created_by: Set(Some(user_id)),
            created_date: Set(now),
            updated_by: Set(Some(user_id)),
            updated_date: Set(now),
        };

        membership.insert(self.db).await
    }

    pub async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<entity::membership::Model>, DbErr> {
        entity::prelude::Membership::find()
            .filter(entity::membership::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Membership::delete_many()
            .filter(entity::membership::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}
