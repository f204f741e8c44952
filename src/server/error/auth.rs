use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ResponseDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Request is missing a bearer token")]
    MissingToken,
    #[error("Bearer token is invalid or expired: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        (
            StatusCode::UNAUTHORIZED,
            Json(ResponseDto::error(
                StatusCode::UNAUTHORIZED.as_u16(),
                "Authentication required".to_string(),
            )),
        )
            .into_response()
    }
}
