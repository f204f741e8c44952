use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct RatingRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RatingRepository<'a, C> {
    /// Creates a new instance of [`RatingRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        rater_id: Uuid,
        organizer_id: Uuid,
        event_id: Uuid,
        score: Decimal,
    ) -> Result<entity::rating::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let rating = entity::rating::ActiveModel {
            id: Set(Uuid::new_v4()),
            rater_id: Set(rater_id),
            organizer_id: Set(organizer_id),
            event_id: Set(event_id),
            score: Set(score),
            rating_date: Set(now),
            created_by: Set(Some(rater_id)),
            created_date: Set(now),
            updated_by: Set(Some(rater_id)),
            updated_date: Set(now),
        };

        rating.insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        rating_id: Uuid,
    ) -> Result<Option<entity::rating::Model>, DbErr> {
        entity::prelude::Rating::find_by_id(rating_id)
            .one(self.db)
            .await
    }

    pub async fn exists(
        &self,
        rater_id: Uuid,
        organizer_id: Uuid,
        event_id: Uuid,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::Rating::find()
            .filter(entity::rating::Column::RaterId.eq(rater_id))
            .filter(entity::rating::Column::OrganizerId.eq(organizer_id))
            .filter(entity::rating::Column::EventId.eq(event_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn find_paginated(
        &self,
        page: u64,
        page_size: u64,
        organizer_id: Option<Uuid>,
    ) -> Result<(Vec<entity::rating::Model>, u64), DbErr> {
        let mut query =
            entity::prelude::Rating::find().order_by_desc(entity::rating::Column::RatingDate);

        if let Some(organizer_id) = organizer_id {
            query = query.filter(entity::rating::Column::OrganizerId.eq(organizer_id));
        }

        let paginator = query.paginate(self.db, page_size);
        let total_items = paginator.num_items().await?;
        let ratings = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((ratings, total_items))
    }

    pub async fn update_score(
        &self,
        rating: entity::rating::Model,
        score: Decimal,
        acting_user: Option<Uuid>,
    ) -> Result<entity::rating::Model, DbErr> {
        let mut rating: entity::rating::ActiveModel = rating.into();
        rating.score = Set(score);
        rating.updated_by = Set(acting_user);
        rating.updated_date = Set(Utc::now().naive_utc());

        rating.update(self.db).await
    }

    pub async fn delete(&self, rating_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Rating::delete_by_id(rating_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_by_event(&self, event_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Rating::delete_many()
            .filter(entity::rating::Column::EventId.eq(event_id))
            .exec(self.db)
            .await
    }

    /// Removes ratings the user made and ratings made about them.
    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Rating::delete_many()
            .filter(
                Condition::any()
                    .add(entity::rating::Column::RaterId.eq(user_id))
                    .add(entity::rating::Column::OrganizerId.eq(user_id)),
            )
            .exec(self.db)
            .await
    }
}
