//! Contract error types for the venue service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use thiserror::Error;

/// Venue service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VenueError {
    /// Missing or malformed input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Target record does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Stale write on a singleton document, or retries exhausted
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Object store rejected an upload
    #[error("Media storage error: {message}")]
    Media { message: String },

    /// Document store operation failed
    #[error("Storage error")]
    Storage,
}

impl VenueError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }
}
