use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::auth::issue_token;
use crate::error::ApiError;
use crate::helpers::{ApiResult, bad_request};

#[derive(Deserialize)]
pub struct TokenRequest {
    pub pennkey: Option<String>,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn create_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let pennkey = payload
        .ok()
        .and_then(|Json(p)| p.pennkey)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| bad_request("Missing pennkey in request body"))?;

    let secret = state.signing_secret()?;
    let token = issue_token(&pennkey, secret, state.config.jwt_ttl_secs)
        .map_err(|e| ApiError::Config(format!("token signing failed: {e}")))?;

    tracing::info!(%pennkey, "token issued");
    Ok(Json(TokenResponse { token }))
}
