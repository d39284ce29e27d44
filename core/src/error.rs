//! Error types for the Cloud Foundry client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the platform returned an error". All
//! other non-2xx responses land in `Upstream` with the raw status and body,
//! plus the platform's `code`, `description` and `error_code` when the body
//! carries them. A 2xx body that
//! does not decode is a `Decode` error, never an upstream one.

use thiserror::Error;

/// Errors returned by resource-client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field is missing or malformed. Raised before any
    /// network call.
    #[error("invalid request: `{field}` {reason}")]
    Validation { field: &'static str, reason: String },

    /// The platform returned 404.
    #[error("resource not found")]
    NotFound { body: String },

    /// The platform returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Upstream {
        status: u16,
        body: String,
        code: Option<i64>,
        description: Option<String>,
        error_code: Option<String>,
    },

    /// A success-class status the operation does not define (e.g. 200 where
    /// only 204 or 202 are expected).
    #[error("unexpected status {status}")]
    UnexpectedStatus { status: u16 },

    /// The response body could not be decoded into the expected type.
    #[error("decoding failed: {0}")]
    Decode(String),

    /// The request payload could not be encoded to JSON.
    #[error("encoding failed: {0}")]
    Encode(String),

    /// The transport could not complete the exchange.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The token provider could not supply a bearer token.
    #[error("token unavailable: {0}")]
    Token(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub(crate) fn missing(field: &'static str) -> Self {
        ApiError::Validation {
            field,
            reason: "must not be empty".to_string(),
        }
    }

    /// HTTP status carried by the error, if it came from the platform.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Upstream { status, .. } | ApiError::UnexpectedStatus { status } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Reject empty or whitespace-only required fields.
pub(crate) fn require(field: &'static str, value: String) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::missing(field));
    }
    Ok(value)
}

/// Like [`require`], for values that become a path segment. `.` and `..`
/// would be normalised away by the server, so they are refused too.
pub(crate) fn require_id(field: &'static str, value: String) -> Result<String, ApiError> {
    let value = require(field, value)?;
    if value == "." || value == ".." {
        return Err(ApiError::Validation {
            field,
            reason: "must not be a relative path segment".to_string(),
        });
    }
    Ok(value)
}
