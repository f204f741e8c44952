use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    /// Absent for top-level comments
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub publication_date: NaiveDateTime,
}

impl From<entity::comment::Model> for CommentDto {
    fn from(comment: entity::comment::Model) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            event_id: comment.event_id,
            parent_id: comment.parent_id,
            content: comment.content,
            publication_date: comment.publication_date,
        }
    }
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    pub event_id: Uuid,
    pub parent_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub content: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdateCommentDto {
    #[validate(length(min = 1, max = 200))]
    pub content: String,
}
