//! Tests for HTTP controller endpoints.
//!
//! These tests invoke the handlers directly against an in-memory database,
//! verifying response codes, the response envelope, and the business rules
//! wired through the service layer.

mod auth;
mod event_flow;

use meetpoint::server::{
    config::Config,
    model::{app::AppState, auth::AuthUser},
};
use meetpoint_test_utils::constant::TEST_JWT_SECRET;
use sea_orm::DatabaseConnection;

pub fn test_app_state(db: DatabaseConnection) -> AppState {
    AppState::new(
        db,
        Config {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: TEST_JWT_SECRET.to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            page_size: 10,
            cors_origins: vec![],
        },
    )
}

pub fn auth_user(user: &entity::user::Model) -> AuthUser {
    AuthUser {
        id: user.id,
        email: user.email.clone(),
        roles: vec!["USER".to_string()],
    }
}
