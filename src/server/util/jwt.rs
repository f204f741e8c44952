//! HS256 access-token creation and validation.

use chrono::{NaiveDateTime, TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::server::{constant::TOKEN_LIFETIME_SECS, model::auth::Claims};

/// Sign a token for the given user; returns the token and its expiration.
pub fn generate_token(
    user_id: Uuid,
    email: &str,
    roles: Vec<String>,
    secret: &str,
) -> Result<(String, NaiveDateTime), jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires_at = now + TimeDelta::seconds(TOKEN_LIFETIME_SECS);

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        roles,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, expires_at.naive_utc()))
}

pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}
