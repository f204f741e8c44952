use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub location: String,
}

pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new_user: NewUser,
        acting_user: Option<Uuid>,
    ) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let user = entity::user::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            location: Set(new_user.location),
            is_blocked: Set(false),
            created_by: Set(acting_user),
            created_date: Set(now),
            updated_by: Set(acting_user),
            updated_date: Set(now),
        };

        user.insert(self.db).await
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Checks whether another user already claims `email`.
    pub async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::User::find().filter(entity::user::Column::Email.eq(email));

        if let Some(user_id) = exclude {
            query = query.filter(entity::user::Column::Id.ne(user_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Page of users ordered by first name, optionally filtered by a search
    /// term over name and email.
    pub async fn find_paginated(
        &self,
        page: u64,
        page_size: u64,
        search_term: Option<&str>,
    ) -> Result<(Vec<entity::user::Model>, u64), DbErr> {
        let mut query =
            entity::prelude::User::find().order_by_asc(entity::user::Column::FirstName);

        if let Some(term) = search_term {
            query = query.filter(
                Condition::any()
                    .add(entity::user::Column::FirstName.contains(term))
                    .add(entity::user::Column::LastName.contains(term))
                    .add(entity::user::Column::Email.contains(term)),
            );
        }

        let paginator = query.paginate(self.db, page_size);
        let total_items = paginator.num_items().await?;
        let users = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((users, total_items))
    }

    pub async fn update(
        &self,
        user: entity::user::Model,
        first_name: String,
        last_name: String,
        email: String,
        location: String,
        acting_user: Option<Uuid>,
    ) -> Result<entity::user::Model, DbErr> {
        let mut user: entity::user::ActiveModel = user.into();
        user.first_name = Set(first_name);
        user.last_name = Set(last_name);
        user.email = Set(email);
        user.location = Set(location);
        user.updated_by = Set(acting_user);
        user.updated_date = Set(Utc::now().naive_utc());

        user.update(self.db).await
    }

    pub async fn set_blocked(
        &self,
        user: entity::user::Model,
        is_blocked: bool,
        acting_user: Option<Uuid>,
    ) -> Result<entity::user::Model, DbErr> {
        let mut user: entity::user::ActiveModel = user.into();
        user.is_blocked = Set(is_blocked);
        user.updated_by = Set(acting_user);
        user.updated_date = Set(Utc::now().naive_utc());

        user.update(self.db).await
    }

    /// Returns OK regardless of the user existing; check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, user_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::User::delete_by_id(user_id)
            .exec(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }
}

pub struct UserRoleRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRoleRepository<'a, C> {
    /// Creates a new instance of [`UserRoleRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn assign(
        &self,
        user_id: Uuid,
        role: &str,
        acting_user: Option<Uuid>,
    ) -> Result<entity::user_role::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let user_role = entity::user_role::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            role: Set(role.to_string()),
            created_by: Set(acting_user),
            created_date: Set(now),
            updated_by: Set(acting_user),
            updated_date: Set(now),
        };

        user_role.insert(self.db).await
    }

    pub async fn find_roles(&self, user_id: Uuid) -> Result<Vec<String>, DbErr> {
        let roles = entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_role::Column::Role)
            .all(self.db)
            .await?;

        Ok(roles.into_iter().map(|assignment| assignment.role).collect())
    }

    pub async fn has_role(&self, user_id: Uuid, role: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .filter(entity::user_role::Column::Role.eq(role))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn delete_by_user(&self, user_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::UserRole::delete_many()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use meetpoint_test_utils::prelude::*;

    mod create_tests {
        use super::super::{NewUser, UserRepository};
        use super::*;

        fn new_user(email: &str) -> NewUser {
            NewUser {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: email.to_string(),
                password_hash: factory::test_password_hash(),
                location: "London".to_string(),
            }
        }

        /// Expect success when creating a new user
        #[tokio::test]
        async fn test_create_user_success() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_tables!(entity::prelude::User)?;
            let user_repository = UserRepository::new(&setup.db);

            let result = user_repository
                .create(new_user("ada@meetpoint.test"), None)
                .await;

            assert!(result.is_ok());

            Ok(())
        }

        /// Expect error when creating a second user with the same email
        #[tokio::test]
        async fn test_create_user_duplicate_email() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_tables!(entity::prelude::User)?;
            let user_repository = UserRepository::new(&setup.db);

            user_repository
                .create(new_user("ada@meetpoint.test"), None)
                .await?;
            let result = user_repository
                .create(new_user("ada@meetpoint.test"), None)
                .await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod find_paginated_tests {
        use super::super::UserRepository;
        use super::*;

        /// Expect the search term to match against name and email
        #[tokio::test]
        async fn test_search_filters_users() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_tables!(
                entity::prelude::User,
                entity::prelude::UserRole
            )?;
            let user_repository = UserRepository::new(&setup.db);

            factory::create_user(&setup.db, "ada@meetpoint.test").await?;
            factory::create_user(&setup.db, "grace@meetpoint.test").await?;

            let (users, total_items) = user_repository
                .find_paginated(1, 10, Some("grace"))
                .await?;

            assert_eq!(total_items, 1);
            assert_eq!(users[0].email, "grace@meetpoint.test");

            Ok(())
        }
    }
}
