//! Submission and configuration errors.

use std::error::Error as StdError;

/// Errors that can occur while sending a validated application.
///
/// Every variant is recoverable: the form keeps its input and the user may
/// submit again.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The endpoint answered with a non-success status.
    #[error("endpoint rejected the application with status {status}")]
    Status {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Response body, if any was readable.
        body: String,
    },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn StdError + Send + Sync>),

    /// The record could not be encoded as JSON.
    #[error("failed to encode application: {0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),
}

impl SubmitError {
    /// Returns the HTTP status for [`SubmitError::Status`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmitError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while building a [`SubmitConfig`](crate::SubmitConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid submission config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The endpoint is not an absolute http(s) URL.
    #[error("invalid endpoint '{0}': expected an absolute http or https URL")]
    InvalidEndpoint(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] Box<dyn StdError + Send + Sync>),
}
