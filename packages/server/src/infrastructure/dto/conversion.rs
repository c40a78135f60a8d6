//! Conversion logic between DTOs and domain types.

use serde_json::Value;

use crate::domain::{ChatMessage, Identity};
use crate::infrastructure::dto::websocket::{ServerEvent, UserJoinPayload};

// ========================================
// DTO → Domain
// ========================================

impl From<UserJoinPayload> for Identity {
    fn from(payload: UserJoinPayload) -> Self {
        Identity::new(payload.email)
    }
}

impl TryFrom<Value> for UserJoinPayload {
    type Error = serde_json::Error;

    fn try_from(data: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(data)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<ChatMessage> for ServerEvent {
    fn from(message: ChatMessage) -> Self {
        ServerEvent::ChatMessage(message.into_body())
    }
}
