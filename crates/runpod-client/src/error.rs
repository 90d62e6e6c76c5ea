//! RunPod client errors

use thiserror::Error;

/// Errors that can occur when interacting with the RunPod API
#[derive(Debug, Error)]
pub enum RunPodError {
    /// Connection-level failure (DNS, TLS, timeout, reset)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// RunPod API answered with a status >= 400
    #[error("RunPod API error: status {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body, kept for caller diagnostics
        body: String,
    },

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A success response whose body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client could not be configured (missing API key, bad base URL)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RunPodError {
    /// True when the remote service reported that the identity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RunPodError::NotFound(_))
    }
}
