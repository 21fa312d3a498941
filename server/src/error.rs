//! HTTP-facing errors.
//!
//! Every error becomes `{"detail": ...}` with the matching status. Storage
//! failures are logged here and reported to the client without internals.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body or path did not match the expected shape (422).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced todo does not exist (404).
    #[error("Todo not found")]
    NotFound,

    /// Persistence failed (500, logged).
    #[error("internal error: {0}")]
    Internal(#[source] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Self::Validation(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail.clone()),
            Self::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Internal(e) => {
                tracing::error!(error = %e, "request failed in storage");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => Self::NotFound,
            other => Self::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
