use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    model::user::{CreateUserDto, UpdateUserDto},
    server::{
        constant::KNOWN_ROLES,
        data::{
            attendance::AttendanceRepository,
            comment::CommentRepository,
            event::EventRepository,
            membership::MembershipRepository,
            rating::RatingRepository,
            report::ReportRepository,
            user::{NewUser, UserRepository, UserRoleRepository},
        },
        error::Error,
        model::auth::AuthUser,
        service::{comment::prune_comment_trees, event::delete_event_cascade},
        util::password,
    },
};

/// Removes a user and every row that references them, on the caller's
/// connection. Events the user organized get the full event cleanup, so
/// their comments, attendances and ratings disappear with them.
async fn delete_user_cascade<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<(), Error> {
    let comment_repository = CommentRepository::new(db);

    let roots = comment_repository.find_ids_by_user(user_id).await?;
    prune_comment_trees(db, roots).await?;

    MembershipRepository::new(db).delete_by_user(user_id).await?;

    for event in EventRepository::new(db).find_by_organizer(user_id).await? {
        delete_event_cascade(db, event.id).await?;
    }

    AttendanceRepository::new(db).delete_by_user(user_id).await?;
    RatingRepository::new(db).delete_by_user(user_id).await?;
    ReportRepository::new(db).delete_by_user(user_id).await?;
    UserRoleRepository::new(db).delete_by_user(user_id).await?;
    UserRepository::new(db).delete(user_id).await?;

    Ok(())
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_user(
        &self,
        user_id: Uuid,
    ) -> Result<(entity::user::Model, Vec<String>), Error> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let roles = UserRoleRepository::new(self.db).find_roles(user.id).await?;

        Ok((user, roles))
    }

    pub async fn get_users(
        &self,
        page: u64,
        page_size: u64,
        search_term: Option<&str>,
    ) -> Result<(Vec<(entity::user::Model, Vec<String>)>, u64), Error> {
        let user_role_repository = UserRoleRepository::new(self.db);

        let (users, total_items) = UserRepository::new(self.db)
            .find_paginated(page, page_size, search_term)
            .await?;

        let mut users_with_roles = Vec::with_capacity(users.len());
        for user in users {
            let roles = user_role_repository.find_roles(user.id).await?;
            users_with_roles.push((user, roles));
        }

        Ok((users_with_roles, total_items))
    }

    /// Admin-side account creation with an explicit role.
    pub async fn create_user(
        &self,
        dto: CreateUserDto,
        acting_user: &AuthUser,
    ) -> Result<(entity::user::Model, Vec<String>), Error> {
        let user_repository = UserRepository::new(self.db);
        let user_role_repository = UserRoleRepository::new(self.db);

        if !KNOWN_ROLES.contains(&dto.role.as_str()) {
            return Err(Error::BadRequest(format!("Unknown role: {}", dto.role)));
        }

        if user_repository.email_taken(&dto.email, None).await? {
            return Err(Error::Conflict("Email is already registered".to_string()));
        }

        let password_hash = password::hash_password(&dto.password)?;

        let user = user_repository
            .create(
                NewUser {
                    first_name: dto.first_name,
                    last_name: dto.last_name,
                    email: dto.email,
                    password_hash,
                    location: dto.location,
                },
                Some(acting_user.id),
            )
            .await?;

        user_role_repository
            .assign(user.id, &dto.role, Some(acting_user.id))
            .await?;

        Ok((user, vec![dto.role]))
    }

    pub async fn update_user(
        &self,
        user_id: Uuid,
        dto: UpdateUserDto,
        acting_user: &AuthUser,
    ) -> Result<(entity::user::Model, Vec<String>), Error> {
        let user_repository = UserRepository::new(self.db);
        let user_role_repository = UserRoleRepository::new(self.db);

        let user = user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        if !acting_user.can_act_for(user.id) {
            return Err(Error::Forbidden(
                "Only the account owner may edit it".to_string(),
            ));
        }

        if user_repository.email_taken(&dto.email, Some(user.id)).await? {
            return Err(Error::Conflict("Email is already registered".to_string()));
        }

        let user = user_repository
            .update(
                user,
                dto.first_name,
                dto.last_name,
                dto.email,
                dto.location,
                Some(acting_user.id),
            )
            .await?;

        let roles = user_role_repository.find_roles(user.id).await?;

        Ok((user, roles))
    }

    /// Flips the blocked flag; calling it twice restores the original state.
    pub async fn toggle_block(
        &self,
        user_id: Uuid,
        acting_user: &AuthUser,
    ) -> Result<entity::user::Model, Error> {
        let user_repository = UserRepository::new(self.db);

        let user = user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let is_blocked = !user.is_blocked;
        let user = user_repository
            .set_blocked(user, is_blocked, Some(acting_user.id))
            .await?;

        Ok(user)
    }

    /// Deletes the user and everything referencing them in one transaction;
    /// a failure at any step leaves every row in place.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), Error> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let txn = self.db.begin().await?;

        match delete_user_cascade(&txn, user_id).await {
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
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use meetpoint_test_utils::prelude::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    use crate::server::{error::Error, model::auth::AuthUser, service::user::UserService};

    fn admin_auth(user: &entity::user::Model) -> AuthUser {
        AuthUser {
            id: user.id,
            email: user.email.clone(),
            roles: vec!["ADMIN".to_string()],
        }
    }

    mod toggle_block_tests {
        use super::*;

        /// Expect two toggles to restore the original flag
        #[tokio::test]
        async fn test_toggle_block_round_trip() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let user_service = UserService::new(&setup.db);

            let admin = factory::create_admin(&setup.db, "admin@meetpoint.test").await?;
            let user = factory::create_user(&setup.db, "ada@meetpoint.test").await?;
            assert!(!user.is_blocked);

            let user = user_service
                .toggle_block(user.id, &admin_auth(&admin))
                .await
                .unwrap();
            assert!(user.is_blocked);

            let user = user_service
                .toggle_block(user.id, &admin_auth(&admin))
                .await
                .unwrap();
            assert!(!user.is_blocked);

            Ok(())
        }
    }

    mod delete_tests {
        use super::*;
        use entity::attendance::AttendanceState;

        /// Expect deleting a user to also fully remove the events they organized
        #[tokio::test]
        async fn test_delete_user_cascades_organized_events() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let user_service = UserService::new(&setup.db);

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

            // Another user's data hanging off the organizer's event.
            factory::create_comment(&setup.db, attendee.id, event.id, None).await?;
            factory::create_attendance(&setup.db, attendee.id, event.id, AttendanceState::Pending)
                .await?;

            user_service.delete_user(organizer.id).await.unwrap();

            assert_eq!(entity::prelude::Event::find().count(&setup.db).await?, 0);
            assert_eq!(entity::prelude::Comment::find().count(&setup.db).await?, 0);
            assert_eq!(
                entity::prelude::Attendance::find().count(&setup.db).await?,
                0
            );
            // The attendee themselves must survive.
            assert!(entity::prelude::User::find_by_id(attendee.id)
                .one(&setup.db)
                .await?
                .is_some());

            Ok(())
        }

        /// Expect a mid-cleanup failure to leave every row untouched
        #[tokio::test]
        async fn test_delete_user_is_atomic() -> Result<(), TestError> {
            // No ratings table: the cascade fails partway through.
            let setup = meetpoint_test_utils::test_setup_with_tables!(
                entity::prelude::User,
                entity::prelude::UserRole,
                entity::prelude::Category,
                entity::prelude::Event,
                entity::prelude::Attendance,
                entity::prelude::Comment,
                entity::prelude::Membership,
                entity::prelude::Report
            )?;
            let user_service = UserService::new(&setup.db);

            let organizer = factory::create_user(&setup.db, "organizer@meetpoint.test").await?;
            let user = factory::create_user(&setup.db, "ada@meetpoint.test").await?;
            let category = factory::create_category(&setup.db, "Tech").await?;
            let event = factory::create_event(
                &setup.db,
                category.id,
                organizer.id,
                Utc::now().naive_utc() + TimeDelta::days(7),
            )
            .await?;
            factory::create_comment(&setup.db, user.id, event.id, None).await?;
            factory::create_attendance(&setup.db, user.id, event.id, AttendanceState::Confirmed)
                .await?;

            let result = user_service.delete_user(user.id).await;

            assert!(result.is_err());
            assert!(entity::prelude::User::find_by_id(user.id)
                .one(&setup.db)
                .await?
                .is_some());
            assert_eq!(entity::prelude::Comment::find().count(&setup.db).await?, 1);
            assert_eq!(
                entity::prelude::Attendance::find().count(&setup.db).await?,
                1
            );

            Ok(())
        }

        /// Expect NotFound for an unknown user id
        #[tokio::test]
        async fn test_delete_user_not_found() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let user_service = UserService::new(&setup.db);

            let result = user_service.delete_user(uuid::Uuid::new_v4()).await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }
    }

    mod create_tests {
        use super::*;
        use crate::model::user::CreateUserDto;
        use meetpoint_test_utils::constant::TEST_PASSWORD;

        fn create_dto(email: &str, role: &str) -> CreateUserDto {
            CreateUserDto {
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                email: email.to_string(),
                password: TEST_PASSWORD.to_string(),
                location: "Arlington".to_string(),
                role: role.to_string(),
            }
        }

        /// Expect BadRequest for a role outside the known set
        #[tokio::test]
        async fn test_create_user_unknown_role() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let user_service = UserService::new(&setup.db);

            let admin = factory::create_admin(&setup.db, "admin@meetpoint.test").await?;

            let result = user_service
                .create_user(
                    create_dto("grace@meetpoint.test", "SUPERUSER"),
                    &admin_auth(&admin),
                )
                .await;

            assert!(matches!(result, Err(Error::BadRequest(_))));

            Ok(())
        }

        /// Expect Conflict for an email that is already registered
        #[tokio::test]
        async fn test_create_user_duplicate_email() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let user_service = UserService::new(&setup.db);

            let admin = factory::create_admin(&setup.db, "admin@meetpoint.test").await?;
            factory::create_user(&setup.db, "grace@meetpoint.test").await?;

            let result = user_service
                .create_user(
                    create_dto("grace@meetpoint.test", "USER"),
                    &admin_auth(&admin),
                )
                .await;

            assert!(matches!(result, Err(Error::Conflict(_))));

            Ok(())
        }
    }
}
