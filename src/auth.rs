use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};

use crate::app::AppState;
use crate::error::ApiError;
use crate::helpers::unauthorized;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pennkey: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid or expired token")]
    Invalid(#[from] jsonwebtoken::errors::Error),
    #[error("token payload has no pennkey")]
    MissingClaim,
}

pub fn issue_token(pennkey: &str, secret: &str, ttl_secs: i64) -> Result<String, TokenError> {
    let now = time::OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        pennkey: Some(pennkey.to_string()),
        iat: now,
        exp: now + ttl_secs,
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Checks signature and expiry, then extracts the pennkey claim.
pub fn verify_token(token: &str, secret: &str) -> Result<String, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    data.claims
        .pennkey
        .filter(|p| !p.is_empty())
        .ok_or(TokenError::MissingClaim)
}

/// Pennkey of the authenticated caller; the owner for every box operation.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub String);

fn get_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header format"))?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        (Some("Bearer"), Some(""), None) => Err(unauthorized("Missing token")),
        _ => Err(unauthorized("Invalid Authorization header format")),
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = get_bearer(&parts.headers)?;
        let secret = state.signing_secret()?;

        match verify_token(token, secret) {
            Ok(pennkey) => Ok(CurrentUser(pennkey)),
            Err(TokenError::MissingClaim) => Err(unauthorized("Invalid token payload")),
            Err(TokenError::Invalid(_)) => Err(unauthorized("Invalid or expired token")),
        }
    }
}
