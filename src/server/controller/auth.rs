use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        api::ResponseDto,
        auth::{LoginDto, RegisterDto, TokenDto},
    },
    server::{error::Error, model::app::AppState, service::auth::AuthService},
};

pub static AUTH_TAG: &str = "auth";

/// Register a new account
///
/// The account is created with the `USER` role and signed in immediately.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = ResponseDto<TokenDto>),
        (status = 400, description = "Validation failed", body = ResponseDto<Object>),
        (status = 409, description = "Email is already registered", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterDto>,
) -> Result<impl IntoResponse, Error> {
    let auth_service = AuthService::new(&state.db, &state.config.jwt_secret);

    dto.validate()?;

    let token = auth_service.register(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::created("Account created", token)),
    )
        .into_response())
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = ResponseDto<TokenDto>),
        (status = 400, description = "Validation failed", body = ResponseDto<Object>),
        (status = 401, description = "Invalid credentials or blocked account", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let auth_service = AuthService::new(&state.db, &state.config.jwt_secret);

    dto.validate()?;

    let token = auth_service.login(dto).await?;

    Ok((StatusCode::OK, Json(ResponseDto::ok("Login successful", token))).into_response())
}
