//! Domain error types.

use thiserror::Error;

/// Errors raised while pushing a frame to a connection
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// No open connection is registered under this id
    #[error("Connection '{0}' not found")]
    ClientNotFound(String),

    /// The connection's outbound channel is closed
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
