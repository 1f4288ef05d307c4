//! Unified error handling for the Joplin client
//!
//! Every client operation returns [`Result`]. The variants map one-to-one onto the
//! failure categories a caller has to tell apart: the service could not be reached,
//! the service refused the request, the service answered with something that is not
//! a valid envelope, or a name-based lookup found nothing.

use std::io;
use thiserror::Error;

/// The main error type for the Joplin client
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JoplinError {
    /// The note service could not be reached (refused, DNS, timeout, ...)
    #[error("Failed to connect to Joplin at {url}: {reason}. Is the Joplin Web Clipper service running?")]
    Connection {
        /// Base URL that was being contacted
        url: String,
        /// Underlying network failure
        reason: String,
    },

    /// The note service answered with a non-success status
    #[error("Joplin API error ({status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response text as sent by the service
        body: String,
    },

    /// The service returned something other than the expected envelope
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// No tag has exactly this title
    #[error("Tag not found: '{0}'")]
    TagNotFound(String),

    /// The caller supplied arguments the operation cannot act on
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl JoplinError {
    /// Whether the service reported the target as missing (HTTP 404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, JoplinError::Api { status: 404, .. })
    }

    /// Whether the failure happened before the service could answer
    pub fn is_connection(&self) -> bool {
        matches!(self, JoplinError::Connection { .. })
    }
}

/// Result type alias for Joplin client operations
pub type Result<T> = std::result::Result<T, JoplinError>;
