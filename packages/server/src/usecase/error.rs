//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::MessagePushError;

/// Errors raised while handling one event.
///
/// None of these are reported back to the client: the event is dropped and logged.
#[derive(Debug, Error)]
pub enum EventError {
    /// The payload does not have the shape the event requires
    #[error("Invalid payload for '{event}': {reason}")]
    InvalidPayload { event: &'static str, reason: String },

    /// No handler is registered for this event name
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    /// The text frame is not a JSON event frame
    #[error("Malformed frame: {0}")]
    MalformedFrame(#[source] serde_json::Error),

    #[error("Failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}
