//! Search client error types.

use thiserror::Error;

/// Errors from resolving credentials, signing, or calling the cluster.
///
/// None of these are retried; every variant is terminal for the operation
/// that produced it.
#[derive(Debug, Clone, Error)]
pub enum SearchClientError {
    /// Credentials could not be resolved or were unusable for signing.
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// Network-level failure (connection refused, DNS, timeout).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The cluster answered with a non-success status.
    #[error("API error: status {status}: {body}")]
    ApiError { status: u16, body: String },

    /// The base URL or a request URL built from it is unusable.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body was not the expected JSON.
    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl SearchClientError {
    /// Create a credential error.
    pub fn credential(msg: impl Into<String>) -> Self {
        Self::CredentialError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create an API error.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid URL error.
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }
}

impl From<reqwest::Error> for SearchClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}
