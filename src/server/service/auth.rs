use sea_orm::DatabaseConnection;

use crate::{
    model::auth::{LoginDto, RegisterDto, TokenDto},
    server::{
        constant::ROLE_USER,
        data::user::{NewUser, UserRepository, UserRoleRepository},
        error::Error,
        util::{jwt, password},
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt_secret: &'a str,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection, jwt_secret: &'a str) -> Self {
        Self { db, jwt_secret }
    }

    /// Registers a new account with the `USER` role and signs it in.
    pub async fn register(&self, dto: RegisterDto) -> Result<TokenDto, Error> {
        let user_repository = UserRepository::new(self.db);
        let user_role_repository = UserRoleRepository::new(self.db);

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
                None,
            )
            .await?;

        user_role_repository
            .assign(user.id, ROLE_USER, Some(user.id))
            .await?;

        let (token, expiration) = jwt::generate_token(
            user.id,
            &user.email,
            vec![ROLE_USER.to_string()],
            self.jwt_secret,
        )?;

        Ok(TokenDto {
            email: user.email,
            token,
            expiration,
        })
    }

    /// Verifies credentials and issues an access token.
    ///
    /// Blocked accounts are rejected even with valid credentials.
    pub async fn login(&self, dto: LoginDto) -> Result<TokenDto, Error> {
        let user_repository = UserRepository::new(self.db);
        let user_role_repository = UserRoleRepository::new(self.db);

        let user = user_repository
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;

        if !password::verify_password(&dto.password, &user.password_hash)? {
            return Err(Error::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        if user.is_blocked {
            return Err(Error::Unauthorized("User account is blocked".to_string()));
        }

        let roles = user_role_repository.find_roles(user.id).await?;

        let (token, expiration) =
            jwt::generate_token(user.id, &user.email, roles, self.jwt_secret)?;

        Ok(TokenDto {
            email: user.email,
            token,
            expiration,
        })
    }
}

#[cfg(test)]
mod tests {
    use meetpoint_test_utils::constant::{TEST_JWT_SECRET, TEST_PASSWORD};
    use meetpoint_test_utils::prelude::*;
    use sea_orm::{ActiveModelTrait, Set};

    use crate::model::auth::{LoginDto, RegisterDto};
    use crate::server::{error::Error, service::auth::AuthService};

    fn register_dto(email: &str) -> RegisterDto {
        RegisterDto {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password: TEST_PASSWORD.to_string(),
            location: "London".to_string(),
        }
    }

    mod register_tests {
        use super::*;

        /// Expect a token whose email matches the new account
        #[tokio::test]
        async fn test_register_success() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let auth_service = AuthService::new(&setup.db, TEST_JWT_SECRET);

            let token = auth_service
                .register(register_dto("ada@meetpoint.test"))
                .await
                .unwrap();

            assert_eq!(token.email, "ada@meetpoint.test");
            assert!(!token.token.is_empty());

            Ok(())
        }

        /// Expect Conflict when the email is already registered
        #[tokio::test]
        async fn test_register_duplicate_email() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let auth_service = AuthService::new(&setup.db, TEST_JWT_SECRET);

            factory::create_user(&setup.db, "ada@meetpoint.test").await?;

            let result = auth_service.register(register_dto("ada@meetpoint.test")).await;

            assert!(matches!(result, Err(Error::Conflict(_))));

            Ok(())
        }
    }

    mod login_tests {
        use super::*;

        /// Expect success with the fixture password
        #[tokio::test]
        async fn test_login_success() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let auth_service = AuthService::new(&setup.db, TEST_JWT_SECRET);

            factory::create_user(&setup.db, "ada@meetpoint.test").await?;

            let token = auth_service
                .login(LoginDto {
                    email: "ada@meetpoint.test".to_string(),
                    password: TEST_PASSWORD.to_string(),
                })
                .await
                .unwrap();

            assert_eq!(token.email, "ada@meetpoint.test");

            Ok(())
        }

        /// Expect Unauthorized for a wrong password
        #[tokio::test]
        async fn test_login_wrong_password() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let auth_service = AuthService::new(&setup.db, TEST_JWT_SECRET);

            factory::create_user(&setup.db, "ada@meetpoint.test").await?;

            let result = auth_service
                .login(LoginDto {
                    email: "ada@meetpoint.test".to_string(),
                    password: "not-the-password".to_string(),
                })
                .await;

            assert!(matches!(result, Err(Error::Unauthorized(_))));

            Ok(())
        }

        /// Expect Unauthorized for a blocked account even with valid credentials
        #[tokio::test]
        async fn test_login_blocked_user() -> Result<(), TestError> {
            let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
            let auth_service = AuthService::new(&setup.db, TEST_JWT_SECRET);

            let user = factory::create_user(&setup.db, "ada@meetpoint.test").await?;
            let mut user: entity::user::ActiveModel = user.into();
            user.is_blocked = Set(true);
            user.update(&setup.db).await?;

            let result = auth_service
                .login(LoginDto {
                    email: "ada@meetpoint.test".to_string(),
                    password: TEST_PASSWORD.to_string(),
                })
                .await;

            assert!(matches!(result, Err(Error::Unauthorized(_))));

            Ok(())
        }
    }
}
