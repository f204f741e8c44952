use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<entity::category::Model> for CategoryDto {
    fn from(category: entity::category::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

/// Payload for both category create and edit.
#[derive(Deserialize, Validate, ToSchema)]
pub struct SaveCategoryDto {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub description: String,
}
