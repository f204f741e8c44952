//! Authenticated-request extractors.
//!
//! [`AuthUser`] pulls the bearer token from the `Authorization` header and
//! validates it; the `Require*` wrappers additionally enforce a role and
//! reject with 403 otherwise.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::server::{
    constant::{ROLE_ADMIN, ROLE_ORGANIZER},
    error::{auth::AuthError, Error},
    model::app::AppState,
    util::jwt,
};

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user's id.
    pub sub: Uuid,
    pub email: String,
    pub roles: Vec<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier for audit.
    pub jti: String,
}

/// Authenticated user extracted from a JWT bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ROLE_ADMIN)
    }

    /// Whether this user may act on a row owned by `owner_id`.
    pub fn can_act_for(&self, owner_id: Uuid) -> bool {
        self.id == owner_id || self.is_admin()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MissingToken)?;

        let claims =
            jwt::validate_token(token, &state.config.jwt_secret).map_err(AuthError::InvalidToken)?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
            roles: claims.roles,
        })
    }
}

/// Requires the `ADMIN` role.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(Error::Forbidden("Admin role required".to_string()));
        }

        Ok(RequireAdmin(user))
    }
}

/// Requires the `ORGANIZER` or `ADMIN` role.
pub struct RequireOrganizer(pub AuthUser);

impl FromRequestParts<AppState> for RequireOrganizer {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() && !user.roles.iter().any(|role| role == ROLE_ORGANIZER) {
            return Err(Error::Forbidden(
                "Organizer or Admin role required".to_string(),
            ));
        }

        Ok(RequireOrganizer(user))
    }
}
