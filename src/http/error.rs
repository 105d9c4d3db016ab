//! Translation of failures into HTTP responses.
//!
//! | Failure | Status | Body |
//! |---|---|---|
//! | missing/invalid fields | 400 | `{"error": <message>}` |
//! | duplicate name | 400 | `{"error": "Name must be unique"}` |
//! | malformed id | 400 | `{"error": "malformatted id"}` |
//! | record not found (read) | 404 | empty |
//! | record not found (update) | 500 | `{"error": "Couldn't find person responding to the id"}` |
//! | unknown route | 404 | `{"error": "unknown endpoint"}` |
//! | database failure | 500 | `{"error": "database error"}` |
//! | anything else | 500 | `{"error": "internal server error"}` |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::contacts::ValidationError;
use crate::store::StoreError;

/// Errors returned by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Name must be unique")]
    DuplicateName,

    #[error("malformatted id")]
    MalformedId,

    #[error("not found")]
    NotFound,

    #[error("Couldn't find person responding to the id")]
    UpdateTargetMissing,

    #[error("unknown endpoint")]
    UnknownEndpoint,

    #[error("database error")]
    Database,

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::DuplicateName | ApiError::MalformedId => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound | ApiError::UnknownEndpoint => StatusCode::NOT_FOUND,
            ApiError::UpdateTargetMissing | ApiError::Database | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MalformedId(_) => ApiError::MalformedId,
            StoreError::Validation(e) => ApiError::Validation(e),
            StoreError::DuplicateName(_) => ApiError::DuplicateName,
            StoreError::Unavailable(_) | StoreError::Timeout(_) => ApiError::Database,
            StoreError::Unsupported { .. } => {
                tracing::error!(error = %err, "Unsupported store operation reached a handler");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::NotFound => status.into_response(),
            other => (status, Json(json!({ "error": other.to_string() }))).into_response(),
        }
    }
}
