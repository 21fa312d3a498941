//! Error types for the todo API client.
//!
//! # Design
//! 404 and 422 get dedicated variants carrying the server's `detail` text,
//! because callers branch on "missing" and "rejected input". Any other
//! unexpected status lands in `Http` with the raw body for debugging.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("not found: {detail}")]
    NotFound { detail: String },

    /// The server returned 422 for the request payload or path.
    #[error("validation failed: {detail}")]
    Validation { detail: String },

    /// Any other status the operation did not expect.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
