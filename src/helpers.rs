use axum::extract::rejection::{JsonRejection, QueryRejection};

use crate::error::{ApiError, FieldIssue};

pub type ApiResult<T> = Result<T, ApiError>;

pub fn bad_request(msg: impl Into<String>) -> ApiError {
    ApiError::BadRequest {
        message: msg.into(),
        errors: Vec::new(),
    }
}

pub fn invalid_body(errors: Vec<FieldIssue>) -> ApiError {
    ApiError::BadRequest {
        message: "Invalid request body".into(),
        errors,
    }
}

pub fn not_found(msg: impl Into<String>) -> ApiError {
    ApiError::NotFound(msg.into())
}

pub fn unauthorized(msg: impl Into<String>) -> ApiError {
    ApiError::Unauthorized(msg.into())
}

/// Malformed JSON or wrong field types never reach the handler.
pub fn json_rejection(e: JsonRejection) -> ApiError {
    invalid_body(vec![FieldIssue::new("", e.body_text())])
}

pub fn query_rejection(e: QueryRejection) -> ApiError {
    ApiError::BadRequest {
        message: "Invalid limit or offset".into(),
        errors: vec![FieldIssue::new("", e.body_text())],
    }
}
