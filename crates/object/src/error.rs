//! Error types for object store access.

use thiserror::Error;

/// Errors that can occur while talking to an object store.
#[derive(Error, Debug)]
pub enum ObjectError {
    /// Configuration error (bad endpoint, bucket, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The object does not exist.
    #[error("Object not found: {0}")]
    NotFound(String),

    /// A request to the store failed.
    #[error("Request failed for {target}: {message}")]
    Request {
        /// Object the request was addressed to.
        target: String,
        /// Error reported by the client.
        message: String,
    },

    /// The handle was used after `close`.
    #[error("Handle already closed: {0}")]
    Closed(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
