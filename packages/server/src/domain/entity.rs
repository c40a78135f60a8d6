//! Entities.

use serde_json::{Map, Value};

/// A chat message as relayed to clients.
///
/// The body is whatever object the sender submitted; the server only adds
/// (or overwrites) the `timestamp` field. Messages are not retained after
/// they are broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    body: Map<String, Value>,
}

impl ChatMessage {
    /// Name of the field carrying the server-assigned time
    pub const TIMESTAMP_FIELD: &'static str = "timestamp";

    /// Stamp a client-submitted object with the server-assigned timestamp
    pub fn stamp(mut body: Map<String, Value>, timestamp: String) -> Self {
        body.insert(Self::TIMESTAMP_FIELD.to_string(), Value::String(timestamp));
        Self { body }
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.body.get(Self::TIMESTAMP_FIELD).and_then(Value::as_str)
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn into_body(self) -> Map<String, Value> {
        self.body
    }
}
