//! Error types for the patient API client.
//!
//! # Design
//! `NotFound` keeps a dedicated variant so callers can tell "the record does
//! not exist" from "the server returned an unexpected status", even though
//! the screens surface both the same way. `Network` covers transport failures
//! where no response arrived at all. `ValidationError` never reaches the
//! network: it blocks a submission before a request is built.

use thiserror::Error;

/// Errors produced while building requests, executing them, or parsing
/// responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// An identifier that cannot be placed in a URL path segment.
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client-side form validation failures. The `Display` text is the exact
/// message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingRequiredFields,

    #[error("Please fill in all fields.")]
    MissingTestFields,

    #[error("Please enter a valid age.")]
    InvalidAge,

    #[error("Please select a valid gender.")]
    InvalidGender,

    #[error("Please select a valid test type.")]
    InvalidTestType,
}
