//! WebSocket event frames.
//!
//! Every text frame carries one named event: `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// client → server: announce presence
pub const USER_JOIN: &str = "user_join";
/// client → server: submit a chat message
pub const NEW_MESSAGE: &str = "new_message";
/// server → client: current connected-user count
pub const UPDATE_USERS: &str = "update_users";
/// server → client: a timestamped chat message
pub const CHAT_MESSAGE: &str = "chat_message";

/// Frame sent by a client.
///
/// The payload is kept as raw JSON; each event handler validates its own shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl ClientFrame {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    pub fn user_join(email: &str) -> Self {
        Self::new(USER_JOIN, json!({ "email": email }))
    }

    pub fn new_message(sender: &str, text: &str) -> Self {
        Self::new(NEW_MESSAGE, json!({ "sender": sender, "text": text }))
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Payload of `user_join`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserJoinPayload {
    pub email: String,
}

/// Frame sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    UpdateUsers(usize),
    ChatMessage(Map<String, Value>),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::UpdateUsers(_) => UPDATE_USERS,
            ServerEvent::ChatMessage(_) => CHAT_MESSAGE,
        }
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
