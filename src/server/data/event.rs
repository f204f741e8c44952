use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

pub struct NewEvent {
    pub category_id: Uuid,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDateTime,
}

pub struct EventRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventRepository<'a, C> {
    /// Creates a new instance of [`EventRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, new_event: NewEvent) -> Result<entity::event::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let event = entity::event::ActiveModel {
            id: Set(Uuid::new_v4()),
            category_id: Set(new_event.category_id),
            organizer_id: Set(new_event.organizer_id),
            title: Set(new_event.title),
            description: Set(new_event.description),
            location: Set(new_event.location),
            date: Set(new_event.date),
            publication_date: Set(now),
            created_by: Set(Some(new_event.organizer_id)),
            created_date: Set(now),
            updated_by: Set(Some(new_event.organizer_id)),
            updated_date: Set(now),
        };

        event.insert(self.db).await
    }

    pub async fn find_by_id(&self, event_id: Uuid) -> Result<Option<entity::event::Model>, DbErr> {
        entity::prelude::Event::find_by_id(event_id)
            .one(self.db)
            .await
    }

    /// Page of events ordered by date descending, optionally filtered by a
    /// search term over title, category name and description.
    pub async fn find_paginated(
        &self,
        page: u64,
        page_size: u64,
        search_term: Option<&str>,
    ) -> Result<(Vec<entity::event::Model>, u64), DbErr> {
        let mut query = entity::prelude::Event::find()
            .left_join(entity::prelude::Category)
            .order_by_desc(entity::event::Column::Date);

        if let Some(term) = search_term {
            query = query.filter(
                Condition::any()
                    .add(entity::event::Column::Title.contains(term))
                    .add(entity::category::Column::Name.contains(term))
                    .add(entity::event::Column::Description.contains(term)),
            );
        }

        let paginator = query.paginate(self.db, page_size);
        let total_items = paginator.num_items().await?;
        let events = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((events, total_items))
    }

    pub async fn find_by_organizer(
        &self,
        organizer_id: Uuid,
    ) -> Result<Vec<entity::event::Model>, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::OrganizerId.eq(organizer_id))
            .all(self.db)
            .await
    }

    pub async fn find_upcoming(&self, limit: u64) -> Result<Vec<entity::event::Model>, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::Date.gt(Utc::now().naive_utc()))
            .order_by_asc(entity::event::Column::Date)
            .limit(limit)
            .all(self.db)
            .await
    }

    pub async fn count_by_category(&self, category_id: Uuid) -> Result<u64, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::CategoryId.eq(category_id))
            .count(self.db)
            .await
    }

    pub async fn update(
        &self,
        event: entity::event::Model,
        category_id: Uuid,
        title: String,
        description: String,
        location: String,
        date: NaiveDateTime,
        acting_user: Option<Uuid>,
    ) -> Result<entity::event::Model, DbErr> {
        let mut event: entity::event::ActiveModel = event.into();
        event.category_id = Set(category_id);
        event.title = Set(title);
        event.description = Set(description);
        event.location = Set(location);
        event.date = Set(date);
        event.updated_by = Set(acting_user);
        event.updated_date = Set(Utc::now().naive_utc());

        event.update(self.db).await
    }

    pub async fn delete(&self, event_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Event::delete_by_id(event_id)
            .exec(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Event::find().count(self.db).await
    }
}

#[cfg(test)]
mod tests {
    use meetpoint_test_utils::prelude::*;

    mod find_paginated_tests {
        use chrono::{TimeDelta, Utc};
        use uuid::Uuid;

        use super::super::{EventRepository, NewEvent};
        use super::*;

        async fn seed_event(
            db: &sea_orm::DatabaseConnection,
            category_id: Uuid,
            organizer_id: Uuid,
            title: &str,
        ) -> Result<entity::event::Model, TestError> {
            let event = EventRepository::new(db)
                .create(NewEvent {
                    category_id,
                    organizer_id,
                    title: title.to_string(),
                    description: "A gathering worth attending".to_string(),
                    location: "Managua".to_string(),
                    date: Utc::now().naive_utc() + TimeDelta::days(7),
                })
                .await?;

            Ok(event)
        }

        /// Expect the search term to match against the category name
        #[tokio::test]
        async fn test_search_matches_category_name() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_tables!(
                entity::prelude::User,
                entity::prelude::UserRole,
                entity::prelude::Category,
                entity::prelude::Event
            )?;
            let event_repository = EventRepository::new(&setup.db);

            let organizer = factory::create_user(&setup.db, "organizer@meetpoint.test").await?;
            let tech = factory::create_category(&setup.db, "Tech").await?;
            let food = factory::create_category(&setup.db, "Food").await?;
            let launch = seed_event(&setup.db, tech.id, organizer.id, "Launch").await?;
            seed_event(&setup.db, food.id, organizer.id, "Picnic").await?;

            let (events, total_items) = event_repository
                .find_paginated(1, 10, Some("Tech"))
                .await?;

            assert_eq!(total_items, 1);
            assert_eq!(events[0].id, launch.id);

            Ok(())
        }

        /// Expect the search term to match against the title
        #[tokio::test]
        async fn test_search_matches_title() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_tables!(
                entity::prelude::User,
                entity::prelude::UserRole,
                entity::prelude::Category,
                entity::prelude::Event
            )?;
            let event_repository = EventRepository::new(&setup.db);

            let organizer = factory::create_user(&setup.db, "organizer@meetpoint.test").await?;
            let tech = factory::create_category(&setup.db, "Tech").await?;
            let launch = seed_event(&setup.db, tech.id, organizer.id, "Launch").await?;
            seed_event(&setup.db, tech.id, organizer.id, "Retrospective").await?;

            let (events, total_items) = event_repository
                .find_paginated(1, 10, Some("Launch"))
                .await?;

            assert_eq!(total_items, 1);
            assert_eq!(events[0].id, launch.id);

            Ok(())
        }

        /// Expect the location to stay out of the search haystack
        #[tokio::test]
        async fn test_search_ignores_location() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_tables!(
                entity::prelude::User,
                entity::prelude::UserRole,
                entity::prelude::Category,
                entity::prelude::Event
            )?;
            let event_repository = EventRepository::new(&setup.db);

            let organizer = factory::create_user(&setup.db, "organizer@meetpoint.test").await?;
            let tech = factory::create_category(&setup.db, "Tech").await?;
            seed_event(&setup.db, tech.id, organizer.id, "Launch").await?;

            let (_, total_items) = event_repository
                .find_paginated(1, 10, Some("Managua"))
                .await?;

            assert_eq!(total_items, 0);

            Ok(())
        }
    }
}
