use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::category::SaveCategoryDto,
    server::{
        data::{category::CategoryRepository, event::EventRepository},
        error::Error,
        model::auth::AuthUser,
    },
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryService<'a> {
    /// Creates a new instance of [`CategoryService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        dto: SaveCategoryDto,
        acting_user: &AuthUser,
    ) -> Result<entity::category::Model, Error> {
        let category_repository = CategoryRepository::new(self.db);

        if category_repository.name_taken(&dto.name, None).await? {
            return Err(Error::Conflict("Category name already exists".to_string()));
        }

        let category = category_repository
            .create(dto.name, dto.description, Some(acting_user.id))
            .await?;

        Ok(category)
    }

    pub async fn get_category(&self, category_id: Uuid) -> Result<entity::category::Model, Error> {
        CategoryRepository::new(self.db)
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| Error::NotFound("Category not found".to_string()))
    }

    pub async fn get_categories(
        &self,
        page: u64,
        page_size: u64,
        search_term: Option<&str>,
    ) -> Result<(Vec<entity::category::Model>, u64), Error> {
        let (categories, total_items) = CategoryRepository::new(self.db)
            .find_paginated(page, page_size, search_term)
            .await?;

        Ok((categories, total_items))
    }

    pub async fn update(
        &self,
        category_id: Uuid,
        dto: SaveCategoryDto,
        acting_user: &AuthUser,
    ) -> Result<entity::category::Model, Error> {
        let category_repository = CategoryRepository::new(self.db);

        let category = category_repository
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;

        if category_repository
            .name_taken(&dto.name, Some(category.id))
            .await?
        {
            return Err(Error::Conflict("Category name already exists".to_string()));
        }

        let category = category_repository
            .update(category, dto.name, dto.description, Some(acting_user.id))
            .await?;

        Ok(category)
    }

    /// A category still referenced by events cannot be removed.
    pub async fn delete(&self, category_id: Uuid) -> Result<(), Error> {
        let category_repository = CategoryRepository::new(self.db);
        let event_repository = EventRepository::new(self.db);

        category_repository
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;

        if event_repository.count_by_category(category_id).await? > 0 {
            return Err(Error::Conflict(
                "Category has events associated with it".to_string(),
            ));
        }

        category_repository.delete(category_id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use meetpoint_test_utils::prelude::*;

    use crate::model::category::SaveCategoryDto;
    use crate::server::{error::Error, model::auth::AuthUser, service::category::CategoryService};

    fn admin_auth(user: &entity::user::Model) -> AuthUser {
        AuthUser {
            id: user.id,
            email: user.email.clone(),
            roles: vec!["ADMIN".to_string()],
        }
    }

    fn save_dto(name: &str) -> SaveCategoryDto {
        SaveCategoryDto {
            name: name.to_string(),
            description: "Events about it".to_string(),
        }
    }

    /// Expect Conflict when the category name is taken
    #[tokio::test]
    async fn test_create_category_duplicate_name() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let category_service = CategoryService::new(&setup.db);

        let admin = factory::create_admin(&setup.db, "admin@meetpoint.test").await?;
        factory::create_category(&setup.db, "Tech").await?;

        let result = category_service
            .create(save_dto("Tech"), &admin_auth(&admin))
            .await;

        assert!(matches!(result, Err(Error::Conflict(_))));

        Ok(())
    }

    /// Expect Conflict when deleting a category that still has events
    #[tokio::test]
    async fn test_delete_category_with_events() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let category_service = CategoryService::new(&setup.db);

        let organizer = factory::create_user(&setup.db, "organizer@meetpoint.test").await?;
        let category = factory::create_category(&setup.db, "Tech").await?;
        factory::create_event(
            &setup.db,
            category.id,
            organizer.id,
            Utc::now().naive_utc() + TimeDelta::days(7),
        )
        .await?;

        let result = category_service.delete(category.id).await;

        assert!(matches!(result, Err(Error::Conflict(_))));

        Ok(())
    }

    /// Expect success deleting an unused category
    #[tokio::test]
    async fn test_delete_category_success() -> Result<(), TestError> {
        let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
        let category_service = CategoryService::new(&setup.db);

        let category = factory::create_category(&setup.db, "Tech").await?;

        category_service.delete(category.id).await.unwrap();

        Ok(())
    }
}
