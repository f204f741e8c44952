use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct EventDto {
    pub id: Uuid,
    pub category_id: Uuid,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDateTime,
    pub publication_date: NaiveDateTime,
}

impl From<entity::event::Model> for EventDto {
    fn from(event: entity::event::Model) -> Self {
        Self {
            id: event.id,
            category_id: event.category_id,
            organizer_id: event.organizer_id,
            title: event.title,
            description: event.description,
            location: event.location,
            date: event.date,
            publication_date: event.publication_date,
        }
    }
}

/// Payload for both event create and edit.
#[derive(Deserialize, Validate, ToSchema)]
pub struct SaveEventDto {
    pub category_id: Uuid,
    #[validate(length(min = 3, max = 50))]
    pub title: String,
    #[validate(length(min = 10, max = 300))]
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub location: String,
    /// Must be strictly in the future
    pub date: NaiveDateTime,
}
