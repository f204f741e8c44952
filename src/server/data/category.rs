use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct CategoryRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryRepository<'a, C> {
    /// Creates a new instance of [`CategoryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: String,
        description: String,
        acting_user: Option<Uuid>,
    ) -> Result<entity::category::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let category = entity::category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(description),
            created_by: Set(acting_user),
            created_date: Set(now),
            updated_by: Set(acting_user),
            updated_date: Set(now),
        };

        category.insert(self.db).await
    }

    pub async fn find_by_id(
        &self,
        category_id: Uuid,
    ) -> Result<Option<entity::category::Model>, DbErr> {
        entity::prelude::Category::find_by_id(category_id)
            .one(self.db)
            .await
    }

    /// Checks whether another category already claims `name`.
    pub async fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Category::find().filter(entity::category::Column::Name.eq(name));

        if let Some(category_id) = exclude {
            query = query.filter(entity::category::Column::Id.ne(category_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    pub async fn find_paginated(
        &self,
        page: u64,
        page_size: u64,
        search_term: Option<&str>,
    ) -> Result<(Vec<entity::category::Model>, u64), DbErr> {
        let mut query = entity::prelude::Category::find()
            .order_by_desc(entity::category::Column::CreatedDate);

        if let Some(term) = search_term {
            query = query.filter(
                Condition::any()
                    .add(entity::category::Column::Name.contains(term))
                    .add(entity::category::Column::Description.contains(term)),
            );
        }

        let paginator = query.paginate(self.db, page_size);
        let total_items = paginator.num_items().await?;
        let categories = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((categories, total_items))
    }

    pub async fn update(
        &self,
        category: entity::category::Model,
        name: String,
        description: String,
        acting_user: Option<Uuid>,
    ) -> Result<entity::category::Model, DbErr> {
        let mut category: entity::category::ActiveModel = category.into();
        category.name = Set(name);
        category.description = Set(description);
        category.updated_by = Set(acting_user);
        category.updated_date = Set(Utc::now().naive_utc());

        category.update(self.db).await
    }

    pub async fn delete(&self, category_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Category::delete_by_id(category_id)
            .exec(self.db)
            .await
    }
}
