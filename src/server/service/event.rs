use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    model::event::SaveEventDto,
    server::{
        constant::ROLE_ORGANIZER,
        data::{
            attendance::AttendanceRepository,
            category::CategoryRepository,
            comment::CommentRepository,
            event::{EventRepository, NewEvent},
            rating::RatingRepository,
            user::UserRoleRepository,
        },
        error::Error,
        model::auth::AuthUser,
        service::comment::prune_comment_trees,
    },
};

/// Removes an event and everything hanging off it on the caller's connection:
/// every comment tree, all attendances, all ratings, then the event row.
///
/// Callers run this inside a transaction so a failure partway leaves the
/// event fully intact.
pub(crate) async fn delete_event_cascade<C: ConnectionTrait>(
    db: &C,
    event_id: Uuid,
) -> Result<(), Error> {
    let comment_repository = CommentRepository::new(db);

    let roots = comment_repository.find_root_ids_by_event(event_id).await?;
    prune_comment_trees(db, roots).await?;

    AttendanceRepository::new(db).delete_by_event(event_id).await?;
    RatingRepository::new(db).delete_by_event(event_id).await?;
    EventRepository::new(db).delete(event_id).await?;

    Ok(())
}

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventService<'a> {
    /// Creates a new instance of [`EventService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an event organized by the acting user.
    ///
    /// First-time organizers are granted the `ORGANIZER` role.
    pub async fn create(
        &self,
        dto: SaveEventDto,
        organizer: &AuthUser,
    ) -> Result<entity::event::Model, Error> {
        let event_repository = EventRepository::new(self.db);
        let user_role_repository = UserRoleRepository::new(self.db);

        self.validate_save(&dto).await?;

        let event = event_repository
            .create(NewEvent {
                category_id: dto.category_id,
                organizer_id: organizer.id,
                title: dto.title,
                description: dto.description,
                location: dto.location,
                date: dto.date,
            })
            .await?;

        if !user_role_repository
            .has_role(organizer.id, ROLE_ORGANIZER)
            .await?
        {
            user_role_repository
                .assign(organizer.id, ROLE_ORGANIZER, Some(organizer.id))
                .await?;
        }

        Ok(event)
    }

    pub async fn get_event(&self, event_id: Uuid) -> Result<entity::event::Model, Error> {
        EventRepository::new(self.db)
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| Error::NotFound("Event not found".to_string()))
    }

    pub async fn get_events(
        &self,
        page: u64,
        page_size: u64,
        search_term: Option<&str>,
    ) -> Result<(Vec<entity::event::Model>, u64), Error> {
        let (events, total_items) = EventRepository::new(self.db)
            .find_paginated(page, page_size, search_term)
            .await?;

        Ok((events, total_items))
    }

    pub async fn update(
        &self,
        event_id: Uuid,
        dto: SaveEventDto,
        acting_user: &AuthUser,
    ) -> Result<entity::event::Model, Error> {
        let event_repository = EventRepository::new(self.db);

        let event = event_repository
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| Error::NotFound("Event not found".to_string()))?;

        if !acting_user.can_act_for(event.organizer_id) {
            return Err(Error::Forbidden(
                "Only the organizer may edit an event".to_string(),
            ));
        }

        self.validate_save(&dto).await?;

        let event = event_repository
            .update(
                event,
                dto.category_id,
                dto.title,
                dto.description,
                dto.location,
                dto.date,
                Some(acting_user.id),
            )
            .await?;

        Ok(event)
    }

    /// Deletes the event and its comments, attendances and ratings in one
    /// transaction.
    pub async fn delete(&self, event_id: Uuid, acting_user: &AuthUser) -> Result<(), Error> {
        let event = EventRepository::new(self.db)
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| Error::NotFound("Event not found".to_string()))?;

        if !acting_user.can_act_for(event.organizer_id) {
            return Err(Error::Forbidden(
                "Only the organizer may delete an event".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        match delete_event_cascade(&txn, event_id).await {
            Ok(()) => {
                txn.commit().await?;

                Ok(())
            }
            Err(err) => {
                txn.rollback().await?;

                Err(err)
            }
        }
    }

    async fn validate_save(&self, dto: &SaveEventDto) -> Result<(), Error> {
        CategoryRepository::new(self.db)
            .find_by_id(dto.category_id)
            .await?
            .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;

        if dto.date <= Utc::now().naive_utc() {
            return Err(Error::BadRequest(
                "Event date must be in the future".to_string(),
            ));
        }

        Ok(())
    }
}
