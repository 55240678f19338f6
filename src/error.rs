use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;
use crate::pokeapi::PokeApiError;

/// One field-level validation problem.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        errors: Vec<FieldIssue>,
    },
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("server configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error(transparent)]
    Upstream(#[from] PokeApiError),
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldIssue>>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Config(_) | ApiError::Storage(_) | ApiError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Config(_) | ApiError::Storage(_) | ApiError::Upstream(_) => {
                "INTERNAL_SERVER_ERROR"
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let body = match self {
            ApiError::BadRequest { message, errors } => ErrorBody {
                code,
                message,
                errors: (!errors.is_empty()).then_some(errors),
            },
            ApiError::Unauthorized(message) | ApiError::NotFound(message) => ErrorBody {
                code,
                message,
                errors: None,
            },
            ApiError::Config(detail) => {
                tracing::error!("{detail}");
                ErrorBody {
                    code,
                    message: "Server configuration error".into(),
                    errors: None,
                }
            }
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "box store failure");
                ErrorBody {
                    code,
                    message: "Storage failure".into(),
                    errors: None,
                }
            }
            ApiError::Upstream(err) => {
                tracing::error!(error = %err, "reference data failure");
                ErrorBody {
                    code,
                    message: "Failed to fetch pokemon data".into(),
                    errors: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
