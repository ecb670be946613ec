//! Controller-specific error types.
//!
//! This module defines the failure classes the space controller reports on
//! top of the Heroku client errors.

use heroku_client::HerokuError;
use thiserror::Error;

/// Errors that can occur in the space controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Heroku API error other than "not found", surfaced unmodified
    #[error("Heroku error: {0}")]
    Heroku(#[from] HerokuError),

    /// The space does not exist on Heroku (already destroyed)
    #[error("Space {id} not found")]
    NotFound {
        id: String,
        #[source]
        source: HerokuError,
    },

    /// Desired state failed validation; no remote call was made
    #[error("Invalid space {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The space was created but reading it back failed.
    ///
    /// The id must be kept by the caller or the space is orphaned.
    #[error("Space {id} was created but could not be read back: {source}")]
    PartialCreate {
        id: String,
        #[source]
        source: Box<ControllerError>,
    },

    /// A force-new field changed; the space must be destroyed and recreated
    #[error("Space {id} requires replacement: {fields} cannot be changed in place")]
    ReplacementRequired {
        id: String,
        fields: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// State store problem (missing or conflicting record)
    #[error("State store error: {0}")]
    Store(String),

    /// State file I/O error
    #[error("State file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// State file encoding error
    #[error("State file serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ControllerError {
    /// Map a client error for space `id`, separating "gone" from other failures
    pub(crate) fn from_heroku(id: &str, err: HerokuError) -> Self {
        if err.is_not_found() {
            ControllerError::NotFound {
                id: id.to_string(),
                source: err,
            }
        } else {
            ControllerError::Heroku(err)
        }
    }

    /// True when the space no longer exists remotely and local state should be dropped
    pub fn is_not_found(&self) -> bool {
        matches!(self, ControllerError::NotFound { .. })
    }

    /// Id of a space that exists remotely despite the error (partial create)
    pub fn created_id(&self) -> Option<&str> {
        match self {
            ControllerError::PartialCreate { id, .. } => Some(id),
            _ => None,
        }
    }
}
