//! Error types for the MeetPoint server.
//!
//! Business failures are typed variants carrying the message shown to the
//! client; infrastructure failures convert via `#[from]` and render as a 500
//! with a generic message after being logged. Everything implements
//! `IntoResponse` so handlers can bubble errors with `?`.

pub mod auth;
pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ResponseDto,
    server::error::{auth::AuthError, config::ConfigError},
};

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Token-level authentication error.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),
    /// A uniqueness or state rule would be violated.
    #[error("{0}")]
    Conflict(String),
    /// A business rule on the request payload was broken.
    #[error("{0}")]
    BadRequest(String),
    /// Credentials rejected or account blocked.
    #[error("{0}")]
    Unauthorized(String),
    /// Authenticated but lacking the required role or ownership.
    #[error("{0}")]
    Forbidden(String),
    /// DTO field validation failure.
    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),
    /// Stored data breaks a structural invariant (e.g. a cyclic reply chain).
    #[error("Data integrity error: {0}")]
    IntegrityError(String),
    /// Internal error indicating a bug in MeetPoint's code.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Token creation error.
    #[error(transparent)]
    JwtError(#[from] jsonwebtoken::errors::Error),
    /// Password hashing error.
    #[error("Password hashing error: {0}")]
    PasswordHashError(argon2::password_hash::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::PasswordHashError(err)
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(ResponseDto::error(status.as_u16(), message)),
    )
        .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::NotFound(message) => error_response(StatusCode::NOT_FOUND, message),
            Self::Conflict(message) => error_response(StatusCode::CONFLICT, message),
            Self::BadRequest(message) => error_response(StatusCode::BAD_REQUEST, message),
            Self::Unauthorized(message) => error_response(StatusCode::UNAUTHORIZED, message),
            Self::Forbidden(message) => error_response(StatusCode::FORBIDDEN, message),
            Self::Validation(errors) => {
                error_response(StatusCode::BAD_REQUEST, errors.to_string())
            }
            // A unique index beat a concurrent writer to it; surface the same
            // conflict the pre-write check would have reported.
            Self::DbErr(ref err)
                if matches!(
                    err.sql_err(),
                    Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
                ) =>
            {
                error_response(StatusCode::CONFLICT, "Resource already exists".to_string())
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the full error but returns a generic message to the client so
/// implementation details never leak.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    }
}
