//! Tests for the registration and login endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use meetpoint::{
    model::auth::{LoginDto, RegisterDto},
    server::{
        controller::auth::{login, register},
        error::Error,
    },
};
use meetpoint_test_utils::prelude::*;

use super::test_app_state;

fn register_dto(email: &str) -> RegisterDto {
    RegisterDto {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        password: "Sup3rS3cret!".to_string(),
        location: "Managua".to_string(),
    }
}

/// Expect 201 with a token for a fresh registration
#[tokio::test]
async fn register_success() -> Result<(), TestError> {
    let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
    let state = test_app_state(setup.db);

    let result = register(State(state), Json(register_dto("ada@meetpoint.test"))).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    Ok(())
}

/// Expect Conflict when the email is already registered
#[tokio::test]
async fn register_duplicate_email() -> Result<(), TestError> {
    let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
    let state = test_app_state(setup.db);

    register(
        State(state.clone()),
        Json(register_dto("ada@meetpoint.test")),
    )
    .await
    .unwrap();
    let result = register(State(state), Json(register_dto("ada@meetpoint.test"))).await;

    assert!(matches!(result, Err(Error::Conflict(_))));

    Ok(())
}

/// Expect a token when logging in with the registered credentials
#[tokio::test]
async fn login_success() -> Result<(), TestError> {
    let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
    let state = test_app_state(setup.db);

    register(
        State(state.clone()),
        Json(register_dto("ada@meetpoint.test")),
    )
    .await
    .unwrap();

    let result = login(
        State(state),
        Json(LoginDto {
            email: "ada@meetpoint.test".to_string(),
            password: "Sup3rS3cret!".to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect Unauthorized for a wrong password
#[tokio::test]
async fn login_wrong_password() -> Result<(), TestError> {
    let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
    let state = test_app_state(setup.db);

    register(
        State(state.clone()),
        Json(register_dto("ada@meetpoint.test")),
    )
    .await
    .unwrap();

    let result = login(
        State(state),
        Json(LoginDto {
            email: "ada@meetpoint.test".to_string(),
            password: "wrong-password".to_string(),
        }),
    )
    .await;

    assert!(matches!(result, Err(Error::Unauthorized(_))));

    Ok(())
}

/// Expect Validation error for a malformed registration payload
#[tokio::test]
async fn register_invalid_payload() -> Result<(), TestError> {
    let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
    let state = test_app_state(setup.db);

    let result = register(
        State(state),
        Json(RegisterDto {
            first_name: "".to_string(),
            last_name: "Lovelace".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            location: "Managua".to_string(),
        }),
    )
    .await;

    assert!(matches!(result, Err(Error::Validation(_))));

    Ok(())
}
