//! Heroku client errors

use thiserror::Error;

/// Errors that can occur when interacting with the Heroku Platform API
#[derive(Debug, Error)]
pub enum HerokuError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Heroku API returned a non-success status
    #[error("Heroku API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Heroku error id (e.g. `invalid_params`), when the body carried one
        id: Option<String>,
        /// Human readable message
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (invalid or expired API key)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., could not build the client)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl HerokuError {
    /// True when the remote entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, HerokuError::NotFound(_))
    }
}
