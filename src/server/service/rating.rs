use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::rating::{CreateRatingDto, UpdateRatingDto},
    server::{
        data::{
            attendance::AttendanceRepository, event::EventRepository, rating::RatingRepository,
            user::UserRepository,
        },
        error::Error,
        model::auth::AuthUser,
    },
};

pub struct RatingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RatingService<'a> {
    /// Creates a new instance of [`RatingService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Rates an organizer for an event the acting user attended.
    ///
    /// Ratings only open once the event date has passed, and only attendees
    /// other than the organizer themselves may rate. One rating per
    /// (rater, organizer, event).
    pub async fn create(
        &self,
        dto: CreateRatingDto,
        rater: &AuthUser,
    ) -> Result<entity::rating::Model, Error> {
        let rating_repository = RatingRepository::new(self.db);
        let attendance_repository = AttendanceRepository::new(self.db);
        let event_repository = EventRepository::new(self.db);
        let user_repository = UserRepository::new(self.db);

        user_repository
            .find_by_id(dto.organizer_id)
            .await?
            .ok_or_else(|| Error::NotFound("Organizer not found".to_string()))?;

        let event = event_repository
            .find_by_id(dto.event_id)
            .await?
            .ok_or_else(|| Error::NotFound("Event not found".to_string()))?;

        if event.date >= Utc::now().naive_utc() {
            return Err(Error::BadRequest(
                "Event has not taken place yet".to_string(),
            ));
        }

        if event.organizer_id != dto.organizer_id {
            return Err(Error::BadRequest(
                "User is not the organizer of this event".to_string(),
            ));
        }

        if rater.id == dto.organizer_id {
            return Err(Error::BadRequest("You cannot rate yourself".to_string()));
        }

        if !attendance_repository.exists(rater.id, event.id).await? {
            return Err(Error::BadRequest(
                "Only attendees may rate this event".to_string(),
            ));
        }

        if rating_repository
            .exists(rater.id, dto.organizer_id, event.id)
            .await?
        {
            return Err(Error::Conflict(
                "You already rated this organizer for this event".to_string(),
            ));
        }

        let rating = rating_repository
            .create(rater.id, dto.organizer_id, event.id, dto.score)
            .await?;

        Ok(rating)
    }

    pub async fn get_rating(&self, rating_id: Uuid) -> Result<entity::rating::Model, Error> {
        RatingRepository::new(self.db)
            .find_by_id(rating_id)
            .await?
            .ok_or_else(|| Error::NotFound("Rating not found".to_string()))
    }

    pub async fn get_ratings(
        &self,
        page: u64,
        page_size: u64,
        organizer_id: Option<Uuid>,
    ) -> Result<(Vec<entity::rating::Model>, u64), Error> {
        let (ratings, total_items) = RatingRepository::new(self.db)
            .find_paginated(page, page_size, organizer_id)
            .await?;

        Ok((ratings, total_items))
    }

    pub async fn update(
        &self,
        rating_id: Uuid,
        dto: UpdateRatingDto,
        acting_user: &AuthUser,
    ) -> Result<entity::rating::Model, Error> {
        let rating_repository = RatingRepository::new(self.db);

        let rating = rating_repository
            .find_by_id(rating_id)
            .await?
            .ok_or_else(|| Error::NotFound("Rating not found".to_string()))?;

        if !acting_user.can_act_for(rating.rater_id) {
            return Err(Error::Forbidden(
                "Only the rater may edit a rating".to_string(),
            ));
        }

        let rating = rating_repository
            .update_score(rating, dto.score, Some(acting_user.id))
            .await?;

        Ok(rating)
    }

    pub async fn delete(&self, rating_id: Uuid, acting_user: &AuthUser) -> Result<(), Error> {
        let rating_repository = RatingRepository::new(self.db);

        let rating = rating_repository
            .find_by_id(rating_id)
            .await?
            .ok_or_else(|| Error::NotFound("Rating not found".to_string()))?;

        if !acting_user.can_act_for(rating.rater_id) {
            return Err(Error::Forbidden(
                "Only the rater may delete a rating".to_string(),
            ));
        }

        rating_repository.delete(rating.id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use entity::attendance::AttendanceState;
    use meetpoint_test_utils::prelude::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::model::rating::CreateRatingDto;
    use crate::server::{error::Error, model::auth::AuthUser, service::rating::RatingService};

    fn auth_user(user: &entity::user::Model) -> AuthUser {
        AuthUser {
            id: user.id,
            email: user.email.clone(),
            roles: vec!["USER".to_string()],
        }
    }

    struct Scenario {
        organizer: entity::user::Model,
        attendee: entity::user::Model,
        event: entity::event::Model,
    }

    /// Past event with a confirmed attendee, ready to be rated.
    async fn seed_past_event(db: &sea_orm::DatabaseConnection) -> Result<Scenario, TestError> {
        let organizer = factory::create_user(db, "organizer@meetpoint.test").await?;
        let attendee = factory::create_user(db, "attendee@meetpoint.test").await?;
        let category = factory::create_category(db, "Tech").await?;
        let event = factory::create_event(
            db,
            category.id,
            organizer.id,
            Utc::now().naive_utc() - TimeDelta::days(1),
        )
        .await?;
        factory::create_attendance(db, attendee.id, event.id, AttendanceState::Confirmed).await?;

        Ok(Scenario {
            organizer,
            attendee,
            event,
        })
    }

    fn dto(scenario: &Scenario) -> CreateRatingDto {
        CreateRatingDto {
            organizer_id: scenario.organizer.id,
            event_id: scenario.event.id,
            score: Decimal::new(45, 1),
        }
    }

    /// Expect success once the event has passed and the rater attended
    #[tokio::test]
    async fn test_create_rating_success() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let rating_service = RatingService::new(&setup.db);

        let scenario = seed_past_event(&setup.db).await?;

        let rating = rating_service
            .create(dto(&scenario), &auth_user(&scenario.attendee))
            .await
            .unwrap();

        assert_eq!(rating.score, Decimal::new(45, 1));
        assert_eq!(rating.organizer_id, scenario.organizer.id);

        Ok(())
    }

    /// Expect BadRequest while the event has not taken place yet
    #[tokio::test]
    async fn test_create_rating_before_event() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let rating_service = RatingService::new(&setup.db);

        let organizer = factory::create_user(&setup.db, "organizer@meetpoint.test").await?;
        let attendee = factory::create_user(&setup.db, "attendee@meetpoint.test").await?;
        let category = factory::create_category(&setup.db, "Tech").await?;
        let event = factory::create_event(
            &setup.db,
            category.id,
            organizer.id,
            Utc::now().naive_utc() + TimeDelta::days(7),
        )
        .await?;
        factory::create_attendance(&setup.db, attendee.id, event.id, AttendanceState::Confirmed)
            .await?;

        let result = rating_service
            .create(
                CreateRatingDto {
                    organizer_id: organizer.id,
                    event_id: event.id,
                    score: Decimal::new(45, 1),
                },
                &auth_user(&attendee),
            )
            .await;

        assert!(matches!(result, Err(Error::BadRequest(_))));

        Ok(())
    }

    /// Expect BadRequest when the organizer rates themselves
    #[tokio::test]
    async fn test_create_rating_self() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let rating_service = RatingService::new(&setup.db);

        let scenario = seed_past_event(&setup.db).await?;
        factory::create_attendance(
            &setup.db,
            scenario.organizer.id,
            scenario.event.id,
            AttendanceState::Confirmed,
        )
        .await?;

        let result = rating_service
            .create(dto(&scenario), &auth_user(&scenario.organizer))
            .await;

        assert!(matches!(result, Err(Error::BadRequest(_))));

        Ok(())
    }

    /// Expect BadRequest when the rater did not attend the event
    #[tokio::test]
    async fn test_create_rating_non_attendee() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let rating_service = RatingService::new(&setup.db);

        let scenario = seed_past_event(&setup.db).await?;
        let stranger = factory::create_user(&setup.db, "stranger@meetpoint.test").await?;

        let result = rating_service
            .create(dto(&scenario), &auth_user(&stranger))
            .await;

        assert!(matches!(result, Err(Error::BadRequest(_))));

        Ok(())
    }

    /// Expect BadRequest when the target is not the event's organizer
    #[tokio::test]
    async fn test_create_rating_wrong_organizer() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let rating_service = RatingService::new(&setup.db);

        let scenario = seed_past_event(&setup.db).await?;
        let other = factory::create_user(&setup.db, "other@meetpoint.test").await?;

        let result = rating_service
            .create(
                CreateRatingDto {
                    organizer_id: other.id,
                    event_id: scenario.event.id,
                    score: Decimal::new(30, 1),
                },
                &auth_user(&scenario.attendee),
            )
            .await;

        assert!(matches!(result, Err(Error::BadRequest(_))));

        Ok(())
    }

    /// Expect Conflict on a duplicate rating for the same triple
    #[tokio::test]
    async fn test_create_rating_duplicate() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let rating_service = RatingService::new(&setup.db);

        let scenario = seed_past_event(&setup.db).await?;

        rating_service
            .create(dto(&scenario), &auth_user(&scenario.attendee))
            .await
            .unwrap();
        let result = rating_service
            .create(dto(&scenario), &auth_user(&scenario.attendee))
            .await;

        assert!(matches!(result, Err(Error::Conflict(_))));

        Ok(())
    }

    /// Expect NotFound for a missing organizer
    #[tokio::test]
    async fn test_create_rating_organizer_not_found() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let rating_service = RatingService::new(&setup.db);

        let scenario = seed_past_event(&setup.db).await?;

        let result = rating_service
            .create(
                CreateRatingDto {
                    organizer_id: Uuid::new_v4(),
                    event_id: scenario.event.id,
                    score: Decimal::new(45, 1),
                },
                &auth_user(&scenario.attendee),
            )
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));

        Ok(())
    }
}
